//! The tools module provides the helpers around the codec core.
//!
//! The tools are:
//! - cli: Command line interface for hufham.
//! - container: Text header plus packed payload file format.
//! - data_out: Output file / stdout selection.
//! - freq_count: Frequency count of the input bytes.
//!
pub mod cli;
pub mod container;
pub mod data_out;
pub mod freq_count;
