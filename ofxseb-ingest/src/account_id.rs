//! Account number lookup in free text such as `"Privatkonto (5357-12 345 67) (53571234567)"`.

use regex::Regex;
use std::sync::LazyLock;

static ACCOUNT_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([0-9]+)\)").expect("account id pattern is valid"));

/// Integer value of the first `(<ascii digits>)` group in `text`.
///
/// Returns `None` when there is no such group or the first one overflows `u64`.
/// Later groups are never consulted.
pub fn extract_account_id(text: &str) -> Option<u64> {
    let caps = ACCOUNT_ID_RE.captures(text)?;
    caps[1].parse().ok()
}
