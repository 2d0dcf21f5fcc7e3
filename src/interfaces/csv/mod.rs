pub mod line_item_reader;
pub mod report_writer;
pub mod rule_reader;
