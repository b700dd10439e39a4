use thiserror::Error;

use tickfolio_core::PortfolioError;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tickfolio_core::ValidationError),

    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Portfolio(error) => match error {
                PortfolioError::InvalidRequest(_) | PortfolioError::Validation(_) => 2,
                PortfolioError::StoreNotFound { .. } | PortfolioError::SymbolNotFound { .. } => 3,
                PortfolioError::Fetch { .. } => 6,
                PortfolioError::Io(_) | PortfolioError::Csv(_) => 10,
            },
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
