#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    Network(String),
    Server {
        status: u16,
        message: Option<String>,
    },
    Decode(String),
}

impl ApiError {
    /// Human-readable message supplied by the server, if the error
    /// response carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server {
                message: Some(msg), ..
            } => Some(msg.as_str()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Network(msg) => {
                write!(f, "Network error: {}", msg)
            }
            ApiError::Server {
                status,
                message: Some(msg),
            } => {
                write!(f, "HTTP {}: {}", status, msg)
            }
            ApiError::Server {
                status,
                message: None,
            } => {
                write!(f, "HTTP {}", status)
            }
            ApiError::Decode(msg) => {
                write!(f, "Invalid response: {}", msg)
            }
        }
    }
}

impl std::error::Error for ApiError {}

pub type ApiResult<T> = Result<T, ApiError>;
