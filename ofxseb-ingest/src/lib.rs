//! ofxseb-ingest: tabular statement sources, the SEB export parser and the plugin registry.

pub mod account_id;
pub mod error;
pub mod parsers;
pub mod plugin;
pub mod sheet;

pub use account_id::extract_account_id;
pub use error::{ParseError, SourceError};
pub use parsers::{SebParser, parse_sheet};
pub use plugin::{Plugin, SwedenSebPlugin, find_plugin, plugins};
pub use sheet::{Cell, Sheet, Table, WorkbookSheet, open_sheet};
