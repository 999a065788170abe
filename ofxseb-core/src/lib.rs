//! ofxseb-core: normalized statement model shared by parsers and writers

pub mod money;
pub mod parser;
pub mod statement;
pub mod transaction_id;

pub use money::{MONEY_SCALE, quantize, try_quantize};
pub use parser::StatementParser;
pub use statement::{BankAccount, Statement, StatementLine, ValidationError};
pub use transaction_id::generate_transaction_id;
