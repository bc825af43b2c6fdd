use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("No season data at {url}")]
    NotFound { url: String },

    #[error("Rate limited by {url} - please wait before retrying")]
    RateLimited { url: String },

    #[error("Server error: {excerpt}")]
    ServerError { status: u16, excerpt: String },

    #[error("Unexpected status {status} from {url}: {excerpt}")]
    UnexpectedStatus {
        status: u16,
        url: String,
        excerpt: String,
    },

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

/// Longest body excerpt carried in an error message, in bytes
const MAX_EXCERPT_BYTES: usize = 200;

/// First part of an error body on a single line. Error pages are often HTML
/// spread over many lines.
fn excerpt(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.len() <= MAX_EXCERPT_BYTES {
        return flat;
    }

    let mut end = MAX_EXCERPT_BYTES;
    while !flat.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}... ({} bytes)", &flat[..end], body.len())
}

impl ApiError {
    /// Map a non-success response from `url` to an error.
    pub fn from_status(status: reqwest::StatusCode, url: &str, body: &str) -> Self {
        let url = url.to_string();
        match status.as_u16() {
            404 => ApiError::NotFound { url },
            429 => ApiError::RateLimited { url },
            code @ 500..=599 => ApiError::ServerError {
                status: code,
                excerpt: excerpt(body),
            },
            code => ApiError::UnexpectedStatus {
                status: code,
                url,
                excerpt: excerpt(body),
            },
        }
    }
}
