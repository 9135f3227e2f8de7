#[derive(Debug, thiserror::Error)]
pub enum OntIdError {
    #[error("truncated input: needed {needed} bytes, {remaining} remaining")]
    TruncatedInput { needed: usize, remaining: usize },

    #[error("encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("unsupported key type: {0}")]
    UnsupportedKeyType(String),

    #[error("invalid address: expected 20 bytes, got {len}")]
    InvalidAddress { len: usize },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("hex error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ledger RPC error ({code}): {message}")]
    Rpc { code: i64, message: String },
}

pub type Result<T> = std::result::Result<T, OntIdError>;

impl OntIdError {
    /// Return a short label for the error category.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TruncatedInput { .. } => "truncated_input",
            Self::Encoding(_) => "encoding",
            Self::UnsupportedKeyType(_) => "unsupported_key_type",
            Self::InvalidAddress { .. } => "invalid_address",
            Self::Json(_) => "json",
            Self::Hex(_) => "hex",
            Self::Http(_) => "http",
            Self::Rpc { .. } => "rpc",
        }
    }
}
