pub mod extractor_output;
pub mod report;
