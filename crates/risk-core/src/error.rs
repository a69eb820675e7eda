//! Error types for the risk assessment engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid trade proposal: {0}")]
    InvalidProposal(String),

    #[error("Numeric conversion failed: {0}")]
    Numeric(String),

    #[error("Evaluator error: {0}")]
    Evaluation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
