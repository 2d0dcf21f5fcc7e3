#![allow(dead_code)]

use rand::Rng;
use std::fs::File;
use std::io::Error;
use std::path::Path;

pub const SEGMENTS: &[&str] = &[
    "TW SAOD + COMP",
    "TW TP",
    "1+5",
    "PVT CAR COMP + SAOD",
    "PVT CAR TP",
    "All GVW & PCV 3W, GCV 3W",
    "SCHOOL BUS",
    "STAFF BUS",
    "TAXI",
    "Misd, Tractor",
    "Unknown Segment XYZ",
];

/// A random payin as an extractor might report it: bare number, percent
/// string, negative percent, or junk.
pub fn random_payin<R: Rng>(rng: &mut R) -> String {
    let value = rng.gen_range(0..=9000) as f64 / 100.0;
    match rng.gen_range(0..10) {
        0 => format!("-{value}%"),
        1 => "N/A".to_string(),
        2 => "abc".to_string(),
        3..=5 => format!("{value}%"),
        _ => format!("{value}"),
    }
}

pub fn generate_csv(path: &Path, rows: usize) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);
    let mut rng = rand::thread_rng();

    wtr.write_record(["segment", "policy_type", "location", "payin", "remark"])?;

    for i in 1..=rows {
        let segment = SEGMENTS[rng.gen_range(0..SEGMENTS.len())];
        wtr.write_record([
            segment,
            "Comp",
            format!("Cluster {i}").as_str(),
            random_payin(&mut rng).as_str(),
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
