//! Test support shared by the pickem backend test binaries.

pub mod logging;
