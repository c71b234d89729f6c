use crate::blog::BlogDataError;

pub type LoadResult<T> = Result<T, LoadError>;

/// Failure to bring up the blog metadata the road needs before it can start.
#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("request for {url} failed: {reason}")]
    Network { url: String, reason: String },

    #[error("request for {url} returned HTTP {status}")]
    Http { url: String, status: u16 },

    #[error("could not read body of {url}: {reason}")]
    Body { url: String, reason: String },

    #[error(transparent)]
    Blog(#[from] BlogDataError),
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("speed must be a finite number above zero, got {0:?}")]
    InvalidSpeed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_names_url_and_status() {
        let err = LoadError::Http {
            url: "../data/blogs.json".to_string(),
            status: 404,
        };
        let text = err.to_string();
        assert!(text.contains("../data/blogs.json"));
        assert!(text.contains("404"));
    }

    #[test]
    fn blog_errors_pass_through_unchanged() {
        let inner = BlogDataError::TooFew {
            found: 1,
            required: 3,
        };
        let expected = inner.to_string();
        let err = LoadError::from(inner);
        assert_eq!(err.to_string(), expected);
    }
}
