//! High-level entry points: analyse a structure file end to end and
//! aggregate the per-file results into lists, summaries, and CSV exports.

pub mod analyse;
pub mod report;
