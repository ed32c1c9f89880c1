use url::Url;

pub const DEFAULT_CHECK_PATH: &str = "scrape_jobs_check";
pub const DEFAULT_STREAM_PATH: &str = "scrape_jobs";

/// Absolute URLs of the two backend endpoints the controller talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub check_url: String,
    pub stream_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EndpointError {
    #[error("invalid base url '{base}': {message}")]
    InvalidBase { base: String, message: String },
    #[error("cannot resolve '{path}' against '{base}': {message}")]
    InvalidPath {
        base: String,
        path: String,
        message: String,
    },
}

impl Endpoints {
    /// Resolves both paths below `base`; a base without a trailing slash is
    /// treated as a directory.
    pub fn from_base(base: &str, check_path: &str, stream_path: &str) -> Result<Self, EndpointError> {
        let mut base_url = Url::parse(base.trim()).map_err(|err| EndpointError::InvalidBase {
            base: base.to_string(),
            message: err.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(EndpointError::InvalidBase {
                base: base.to_string(),
                message: "url cannot carry paths".to_string(),
            });
        }
        if !base_url.path().ends_with('/') {
            let directory = format!("{}/", base_url.path());
            base_url.set_path(&directory);
        }

        let resolve = |path: &str| {
            base_url
                .join(path.trim().trim_start_matches('/'))
                .map(|url| url.to_string())
                .map_err(|err| EndpointError::InvalidPath {
                    base: base.to_string(),
                    path: path.to_string(),
                    message: err.to_string(),
                })
        };

        Ok(Self {
            check_url: resolve(check_path)?,
            stream_url: resolve(stream_path)?,
        })
    }

    pub fn with_defaults(base: &str) -> Result<Self, EndpointError> {
        Self::from_base(base, DEFAULT_CHECK_PATH, DEFAULT_STREAM_PATH)
    }
}
