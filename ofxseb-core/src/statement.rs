//! Normalized statement types handed to the OFX writer

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::money::quantize;
use crate::transaction_id::generate_transaction_id;

/// Bank + account pair attached to every statement line
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BankAccount {
    pub bank_id: String,
    pub acct_id: u64,
}

impl BankAccount {
    pub fn new(bank_id: impl Into<String>, acct_id: u64) -> Self {
        Self {
            bank_id: bank_id.into(),
            acct_id,
        }
    }
}

/// One transaction row of a statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementLine {
    /// Deterministic id, see [`generate_transaction_id`]
    pub id: String,
    /// Posting date
    pub date: NaiveDate,
    /// Date shown to the account holder
    pub date_user: NaiveDate,
    pub refnum: String,
    pub memo: String,
    /// Signed, two fraction digits. Negative = money out.
    pub amount: Decimal,
    pub bank_account_to: BankAccount,
}

impl StatementLine {
    /// Build a line, normalizing the amount and deriving its id.
    pub fn new(
        date: NaiveDate,
        date_user: NaiveDate,
        refnum: impl Into<String>,
        memo: impl Into<String>,
        amount: Decimal,
        bank_account_to: BankAccount,
    ) -> Self {
        let refnum = refnum.into();
        let memo = memo.into();
        let amount = quantize(amount);
        let id = generate_transaction_id(date, amount, &refnum, &memo);

        Self {
            id,
            date,
            date_user,
            refnum,
            memo,
            amount,
            bank_account_to,
        }
    }
}

/// A parsed statement. `lines` keeps the source order (most recent first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statement {
    pub bank_id: String,
    pub currency: String,
    pub account_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Balance before the oldest listed transaction
    pub start_balance: Decimal,
    /// Balance after the most recent listed transaction
    pub end_balance: Decimal,
    pub lines: Vec<StatementLine>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("statement starts on {start} but ends on {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("line {id} dated {date} falls outside {start}..={end}")]
    LineOutOfRange {
        id: String,
        date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error(
        "opening balance {start_balance} plus transactions {total} gives {computed}, expected closing balance {end_balance}"
    )]
    BalanceMismatch {
        start_balance: Decimal,
        total: Decimal,
        computed: Decimal,
        end_balance: Decimal,
    },
}

impl Statement {
    /// Sum of all line amounts
    pub fn total_amount(&self) -> Decimal {
        self.lines.iter().map(|l| l.amount).sum()
    }

    /// Opening balance with every transaction applied
    pub fn computed_end_balance(&self) -> Decimal {
        self.start_balance + self.total_amount()
    }

    /// Check date bounds and that the balances agree with the transactions.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.start_date > self.end_date {
            return Err(ValidationError::InvertedRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        if let Some(line) = self
            .lines
            .iter()
            .find(|l| l.date < self.start_date || l.date > self.end_date)
        {
            return Err(ValidationError::LineOutOfRange {
                id: line.id.clone(),
                date: line.date,
                start: self.start_date,
                end: self.end_date,
            });
        }

        let computed = self.computed_end_balance();
        if computed != self.end_balance {
            return Err(ValidationError::BalanceMismatch {
                start_balance: self.start_balance,
                total: self.total_amount(),
                computed,
                end_balance: self.end_balance,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn account() -> BankAccount {
        BankAccount::new("SE31500000000", 12345)
    }

    fn line(day: u32, amount: Decimal) -> StatementLine {
        let d = date(2023, 1, day);
        StatementLine::new(d, d, format!("REF{day}"), "memo", amount, account())
    }

    fn statement(lines: Vec<StatementLine>) -> Statement {
        Statement {
            bank_id: "SE31500000000".to_string(),
            currency: "SEK".to_string(),
            account_id: 12345,
            start_date: date(2023, 1, 5),
            end_date: date(2023, 1, 10),
            start_balance: dec!(1000.00),
            end_balance: dec!(1150.00),
            lines,
        }
    }

    #[test]
    fn test_line_new_quantizes_amount() {
        let l = line(10, dec!(12.3));
        assert_eq!(l.amount.to_string(), "12.30");
        assert_eq!(l.bank_account_to.acct_id, 12345);
        assert_eq!(l.id, line(10, dec!(12.30)).id);
    }

    #[test]
    fn test_valid_statement() {
        let s = statement(vec![line(10, dec!(200.00)), line(5, dec!(-50.00))]);
        assert_eq!(s.total_amount(), dec!(150.00));
        assert_eq!(s.computed_end_balance(), dec!(1150.00));
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn test_balance_mismatch() {
        let s = statement(vec![line(10, dec!(200.00))]);
        match s.validate() {
            Err(ValidationError::BalanceMismatch { computed, .. }) => {
                assert_eq!(computed, dec!(1200.00))
            }
            other => panic!("expected BalanceMismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_line_out_of_range() {
        let s = statement(vec![line(11, dec!(150.00))]);
        assert!(matches!(
            s.validate(),
            Err(ValidationError::LineOutOfRange { .. })
        ));
    }

    #[test]
    fn test_inverted_range() {
        let mut s = statement(vec![]);
        s.start_date = date(2023, 2, 1);
        assert!(matches!(
            s.validate(),
            Err(ValidationError::InvertedRange { .. })
        ));
    }

    #[test]
    fn test_amounts_serialize_with_scale() {
        let s = statement(vec![line(10, dec!(150))]);
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["lines"][0]["amount"], "150.00");
        assert_eq!(json["start_balance"], "1000.00");
        assert_eq!(json["lines"][0]["date"], "2023-01-10");
    }
}
