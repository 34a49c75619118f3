//! Library components of the `ctk` command-line tool.

pub mod json;
pub mod logging;
