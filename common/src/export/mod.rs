//! Export core modules shared across the CLI and other front ends.

pub mod csv_core;
