//! Deterministic transaction ids for duplicate detection across imports.
//!
//! SEB exports carry no stable transaction id, so one is derived from the
//! visible fields of the line: SHA-256 over
//! `date ␟ amount ␟ refnum ␟ memo`, where `␟` is the ASCII unit separator
//! (0x1f), the date is ISO `YYYY-MM-DD` and the amount is rendered with
//! exactly two fraction digits. The digest is returned as lowercase hex.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::money::quantize;

const FIELD_SEPARATOR: [u8; 1] = [0x1f];

pub fn generate_transaction_id(date: NaiveDate, amount: Decimal, refnum: &str, memo: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format("%Y-%m-%d").to_string().as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(quantize(amount).to_string().as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(refnum.as_bytes());
    hasher.update(FIELD_SEPARATOR);
    hasher.update(memo.as_bytes());
    hex::encode(hasher.finalize())
}
