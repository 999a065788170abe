//! Named parser plugins, looked up from config profiles or the command line.

use ofxseb_core::StatementParser;
use std::path::Path;

use crate::error::ParseError;
use crate::parsers::SebParser;

pub type BoxedParser = Box<dyn StatementParser<Error = ParseError>>;

pub trait Plugin {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn get_parser(&self, path: &Path) -> BoxedParser;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SwedenSebPlugin;

impl Plugin for SwedenSebPlugin {
    fn name(&self) -> &'static str {
        "swedenseb"
    }

    fn description(&self) -> &'static str {
        "SEB (Sweden) account statement export"
    }

    fn get_parser(&self, path: &Path) -> BoxedParser {
        Box::new(SebParser::new(path))
    }
}

pub fn plugins() -> Vec<Box<dyn Plugin>> {
    vec![Box::new(SwedenSebPlugin)]
}

/// Case-insensitive lookup by plugin name
pub fn find_plugin(name: &str) -> Option<Box<dyn Plugin>> {
    plugins()
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
}
