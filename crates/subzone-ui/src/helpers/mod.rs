// crates/subzone-ui/src/helpers/mod.rs
//
// Process-level plumbing for the binary: logging setup and the crash report.

pub mod crash;
pub mod log;
