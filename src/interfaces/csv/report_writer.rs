use crate::domain::line_item::LineOutcome;
use crate::error::Result;
use crate::interfaces::row::ReportRow;
use std::io::Write;

/// Writes payout outcomes as CSV, one row per outcome in batch order.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_outcomes(&mut self, outcomes: &[LineOutcome]) -> Result<()> {
        for outcome in outcomes {
            self.writer.serialize(ReportRow::from(outcome))?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
