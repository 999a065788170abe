//! Bank-specific statement parsers

pub mod seb;

pub use seb::{SebParser, parse_sheet};
