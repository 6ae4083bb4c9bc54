//! flvscope - FLV stream inspector
//!
//! The library half of the `flvscope` binary: configuration loading and the
//! text/JSON report consumers that sit on top of the `flvscope-flv` decoder.

pub mod config;
pub mod report;

pub use report::analyze;
