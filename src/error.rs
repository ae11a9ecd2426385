use thiserror::Error;

#[derive(Error, Debug)]
pub enum FarthingError {
    /// No user identifier was supplied with the request.
    #[error("Access denied: no user identified in the URL")]
    MissingUser,

    /// The supplied identifier does not parse as an integer.
    #[error("Invalid user identifier: {0:?} is not an integer")]
    InvalidUser(String),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored row that cannot be turned into a typed transaction.
    #[error("Bad row in transactions table: {0}")]
    BadRow(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, FarthingError>;
