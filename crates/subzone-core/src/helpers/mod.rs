// crates/subzone-core/src/helpers/mod.rs
//
// Small pure helpers shared by the compositor and the UI crate.

pub mod geometry;
