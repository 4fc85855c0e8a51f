use crate::ui::prompt::Redirect;

pub type Result<T> = std::result::Result<T, Error>;

/// Marker the backend embeds in every response for a missing or unknown login.
pub const NOT_LOGGED_IN_MARKER: &str = "Could not serve without logging in";

/// Marker the backend embeds when a submitted test is unknown or has expired.
pub const TEST_EXPIRED_MARKER: &str = "Test is not authencated by system or expired";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not authenticated: {}", NOT_LOGGED_IN_MARKER)]
    NotAuthenticated,

    #[error("Session expired: {}", TEST_EXPIRED_MARKER)]
    SessionExpired,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Classifies a non-success response body from the backend.
    pub fn from_response_text(text: String) -> Self {
        if text.contains(NOT_LOGGED_IN_MARKER) {
            Error::NotAuthenticated
        } else if text.contains(TEST_EXPIRED_MARKER) {
            Error::SessionExpired
        } else {
            Error::Server(text)
        }
    }

    /// The blocking alert shown to the user for this error.
    pub fn alert_message(&self) -> String {
        match self {
            Error::NotAuthenticated => {
                "Error: Not logined. You must login first to participate in the test!".to_string()
            }
            Error::SessionExpired => {
                "Error: Test is not authencated by OTSS or expired. Please refresh the page"
                    .to_string()
            }
            Error::Server(text) => format!("Internal Server Error: {}", text),
            Error::Network(_) => "Error: Could not reach the server".to_string(),
            Error::Validation(err) => format!("Error: {}", err),
            Error::InvalidInput(msg) => format!("Error: {}", msg),
            other => format!("Error: {}", other),
        }
    }

    /// Where the user must be sent after this error, if anywhere.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            Error::NotAuthenticated => Some(Redirect::Login),
            _ => None,
        }
    }

    /// Whether repeating the triggering action may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, Error::NotAuthenticated | Error::Config(_))
    }
}

/// The three ways acquiring a test can fail.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Not authenticated: {}", NOT_LOGGED_IN_MARKER)]
    NotAuthenticated,

    #[error("Server error: {0}")]
    Server(String),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),
}

impl From<Error> for FetchError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotAuthenticated => FetchError::NotAuthenticated,
            Error::Network(e) => FetchError::Network(e),
            Error::Server(text) => FetchError::Server(text),
            other => FetchError::Server(other.to_string()),
        }
    }
}

impl FetchError {
    pub fn alert_message(&self) -> String {
        match self {
            FetchError::NotAuthenticated => Error::NotAuthenticated.alert_message(),
            FetchError::Server(text) => format!("Internal Server Error: {}", text),
            FetchError::Network(_) => "Error: Could not fetch any question. Test aborted".to_string(),
        }
    }

    /// A server error leaves the user on the test page.
    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            FetchError::NotAuthenticated => Some(Redirect::Login),
            FetchError::Server(_) => None,
            FetchError::Network(_) => Some(Redirect::Index),
        }
    }
}
