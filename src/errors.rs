use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Metadata load error: {0}")]
    MetadataLoad(String),

    #[error("Invalid price for {symbol}: {reason}")]
    InvalidPrice { symbol: String, reason: String },

    #[error("Stream read error: {0}")]
    StreamRead(String),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),
}

impl AppError {
    pub fn invalid_price(symbol: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPrice {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}
