//! Record sources and rule-table loading backed by files or memory.

pub mod file_source;
pub mod in_memory;
pub mod rule_file;
