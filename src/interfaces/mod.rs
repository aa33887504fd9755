//! Boundary surface: request types, validation and CSV codecs used by the CLI.

pub mod csv;
pub mod requests;
