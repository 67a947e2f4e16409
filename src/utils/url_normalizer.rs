//! URL normalization for link creation.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,
}

/// Normalizes a destination URL to a canonical form.
///
/// # Rules
///
/// 1. Surrounding whitespace is trimmed
/// 2. A missing scheme defaults to `https://`
/// 3. Only HTTP and HTTPS are accepted
/// 4. The host is lowercased by the parser
///
/// # Errors
///
/// Returns [`UrlNormalizationError`] for empty input, non-HTTP(S) schemes,
/// or input the parser rejects.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else if trimmed.contains("://") {
        return Err(UrlNormalizationError::UnsupportedProtocol);
    } else {
        format!("https://{}", trimmed)
    };

    let url = Url::parse(&candidate)
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedProtocol),
    }

    Ok(url.to_string())
}
