// crates/subzone-media/src/helpers/mod.rs
//
// FFmpeg plumbing used by session.rs. Not part of the public API.

pub mod seek;
