//! Error and result types shared across the crate.

use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// The member list request came back with a non-success status.
#[derive(Debug)]
pub struct FetchError {
    pub url: String,
    pub status: u16,
}

impl FetchError {
    pub fn new(url: impl Into<String>, status: u16) -> Self {
        Self {
            url: url.into(),
            status,
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "request to {} returned status {}", self.url, self.status)
    }
}

impl std::error::Error for FetchError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_display_includes_url_and_status() {
        let err = FetchError::new("http://example.test/members.json", 503);
        let msg = err.to_string();
        assert!(msg.contains("http://example.test/members.json"));
        assert!(msg.contains("503"));
    }
}
