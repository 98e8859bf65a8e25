//! Conversion client configuration.

/// Default conversion endpoint, resolved against the page origin.
pub const DEFAULT_ENDPOINT: &str = "/upload";

/// Configuration for the remote conversion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// URL the selected image is POSTed to. Relative URLs resolve against
    /// the page origin; a development backend typically serves an absolute
    /// URL such as `http://localhost:4000/upload`.
    pub endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_posts_to_same_origin_upload() {
        assert_eq!(ClientConfig::default().endpoint, "/upload");
    }
}
