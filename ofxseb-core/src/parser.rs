use crate::statement::Statement;

/// Host-side contract: a parser bound to one input that yields a [`Statement`].
pub trait StatementParser {
    type Error: std::error::Error + Send + Sync + 'static;

    fn parse(&self) -> Result<Statement, Self::Error>;
}
