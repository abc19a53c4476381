use std::{error, fmt, sync::Arc};

/// Everything that can go wrong between building a request and drawing its
/// result. Cheap to clone, so a failure can be logged, presented and returned.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum RouteError {
    /// Non-2xx status, or no response at all (`status_code` is `None`).
    Transport {
        status_code: Option<u16>,
        url: String,
        response: Option<String>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    },
    /// A 2xx response whose body is not a route response.
    Decode(Arc<serde_json::Error>),
    /// A 2xx response carrying fewer than two path points.
    MalformedRoute { points: usize },
    /// A renderer was handed a model that can not be drawn.
    InvalidModel { points: usize },
    InvalidCoordinate {
        field: &'static str,
        latitude: f64,
        longitude: f64,
    },
    /// A newer plan was issued while this one was in flight.
    StaleResponse { sequence: u64, latest: u64 },
    /// The route view task is gone.
    ViewClosed,
}

pub type RouteResult<O> = Result<O, RouteError>;

impl RouteError {
    pub fn status<S: Into<String>>(status_code: u16, url: S, response: Option<String>) -> Self {
        Self::Transport {
            status_code: Some(status_code),
            url: url.into(),
            response,
            source: None,
        }
    }

    pub fn connection<S, E>(url: S, why: E) -> Self
    where
        S: Into<String>,
        E: error::Error + Send + Sync + 'static,
    {
        Self::Transport {
            status_code: None,
            url: url.into(),
            response: None,
            source: Some(Arc::new(why)),
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Transport { status_code, .. } => *status_code,
            _ => None,
        }
    }

    /// Failures the caller may sensibly retry by issuing a new request.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { status_code, .. } => {
                status_code.map_or(true, |code| code >= 500 || code == 429)
            }
            _ => false,
        }
    }
}

impl error::Error for RouteError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Transport {
                source: Some(why), ..
            } => Some(why.as_ref()),
            Self::Decode(why) => Some(why.as_ref()),
            _ => None,
        }
    }
}

impl fmt::Display for RouteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Transport {
                status_code: Some(code),
                url,
                response: Some(text),
                ..
            } => write!(f, "Invalid response ({code}) {url}: {text}"),
            Self::Transport {
                status_code: Some(code),
                url,
                ..
            } => write!(f, "Invalid response ({code}) {url}"),
            Self::Transport {
                url,
                source: Some(why),
                ..
            } => write!(f, "HTTP request to {url} failed: {why}"),
            Self::Transport { url, .. } => write!(f, "HTTP request to {url} failed"),
            Self::Decode(why) => write!(f, "JSON parse error: {why}"),
            Self::MalformedRoute { points } => {
                write!(f, "Route has {points} path point(s), at least 2 are required")
            }
            Self::InvalidModel { points } => {
                write!(f, "Can not render a route with {points} path point(s)")
            }
            Self::InvalidCoordinate {
                field,
                latitude,
                longitude,
            } => write!(f, "Invalid coordinate for {field}: ({latitude}, {longitude})"),
            Self::StaleResponse { sequence, latest } => write!(
                f,
                "Discarded response of request #{sequence}, request #{latest} is newer"
            ),
            Self::ViewClosed => write!(f, "Route view is no longer running."),
        }
    }
}

impl From<serde_json::Error> for RouteError {
    fn from(e: serde_json::Error) -> Self {
        RouteError::Decode(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_display_includes_status_and_body() {
        let err = RouteError::status(500, "http://backend/api/route/plan", Some("boom".into()));
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(
            err.to_string(),
            "Invalid response (500) http://backend/api/route/plan: boom"
        );
        assert!(err.is_retryable());
    }

    #[test]
    fn client_errors_are_not_retryable() {
        assert!(!RouteError::status(400, "u", None).is_retryable());
        assert!(RouteError::status(429, "u", None).is_retryable());
        assert!(!RouteError::MalformedRoute { points: 1 }.is_retryable());
    }

    #[test]
    fn decode_errors_keep_their_source() {
        let json_error = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: RouteError = json_error.into();
        assert!(matches!(err, RouteError::Decode(_)));
        assert!(error::Error::source(&err).is_some());
        assert_eq!(err.status_code(), None);
    }
}
