use std::fmt;

use model::RouteError;
use serde::Serialize;

/// A failure as shown to the user. `text` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserMessage {
    pub text: String,
    /// Whether asking again has a chance of working.
    pub retryable: bool,
}

impl UserMessage {
    fn new<S: Into<String>>(text: S, retryable: bool) -> Self {
        Self {
            text: text.into(),
            retryable,
        }
    }
}

impl fmt::Display for UserMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

const FALLBACK: &str = "Route planning failed.";

#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorPresenter;

impl ErrorPresenter {
    pub fn new() -> Self {
        Self
    }

    pub fn present(&self, error: &RouteError) -> UserMessage {
        log::debug!("presenting error: {}", error);
        let retryable = error.is_retryable();
        match error {
            RouteError::Transport {
                status_code: None, ..
            } => UserMessage::new(
                "Could not reach the route planner. Check your connection and try again.",
                retryable,
            ),
            RouteError::Transport {
                status_code: Some(429),
                ..
            } => UserMessage::new(
                "The route planner is busy right now. Please try again in a moment.",
                retryable,
            ),
            RouteError::Transport {
                status_code: Some(code),
                ..
            } if *code >= 500 => UserMessage::new(
                format!("The route planner ran into a problem (HTTP {code}). Please try again."),
                retryable,
            ),
            RouteError::Transport {
                status_code: Some(code),
                ..
            } => UserMessage::new(
                format!("The route planner rejected the request (HTTP {code})."),
                retryable,
            ),
            RouteError::Decode(_) => UserMessage::new(
                "The route planner sent an answer that could not be read.",
                retryable,
            ),
            RouteError::MalformedRoute { .. } => UserMessage::new(
                "No route could be found between these points.",
                retryable,
            ),
            RouteError::InvalidModel { .. } => {
                UserMessage::new("The route could not be displayed.", retryable)
            }
            RouteError::InvalidCoordinate { field, .. } => UserMessage::new(
                format!("The {} is not a valid coordinate.", field_label(field)),
                retryable,
            ),
            RouteError::StaleResponse { .. } => UserMessage::new(
                "This route was replaced by a newer request.",
                retryable,
            ),
            RouteError::ViewClosed => {
                UserMessage::new("The map is no longer available.", retryable)
            }
            _ => UserMessage::new(FALLBACK, retryable),
        }
    }
}

fn field_label(field: &str) -> &str {
    match field {
        "startPoint" => "start point",
        "endPoint" => "end point",
        "pathPoints" => "waypoint",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::*;

    fn all_errors() -> Vec<RouteError> {
        vec![
            RouteError::status(500, "http://localhost:8050/api/route/plan", None),
            RouteError::status(429, "http://localhost:8050/api/route/plan", None),
            RouteError::status(404, "http://localhost:8050/api/route/plan", Some("no".into())),
            RouteError::connection(
                "http://localhost:8050/api/route/plan",
                io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
            ),
            serde_json::from_str::<u8>("nope").unwrap_err().into(),
            RouteError::MalformedRoute { points: 1 },
            RouteError::InvalidModel { points: 0 },
            RouteError::InvalidCoordinate {
                field: "startPoint",
                latitude: 91.0,
                longitude: 0.0,
            },
            RouteError::StaleResponse {
                sequence: 1,
                latest: 2,
            },
            RouteError::ViewClosed,
        ]
    }

    #[test]
    fn every_error_gets_a_message() {
        let presenter = ErrorPresenter::new();
        for error in all_errors() {
            let message = presenter.present(&error);
            assert!(!message.text.is_empty(), "empty message for {error:?}");
        }
    }

    #[test]
    fn server_errors_mention_the_status() {
        let message = ErrorPresenter::new().present(&RouteError::status(
            500,
            "http://localhost:8050/api/route/plan",
            None,
        ));
        assert!(message.text.contains("500"));
        assert!(message.retryable);
    }

    #[test]
    fn client_errors_are_not_retryable() {
        let message = ErrorPresenter::new().present(&RouteError::status(
            400,
            "http://localhost:8050/api/route/plan",
            None,
        ));
        assert!(message.text.contains("400"));
        assert!(!message.retryable);
    }

    #[test]
    fn coordinate_errors_name_the_field() {
        let message = ErrorPresenter::new().present(&RouteError::InvalidCoordinate {
            field: "endPoint",
            latitude: 0.0,
            longitude: 181.0,
        });
        assert_eq!(message.text, "The end point is not a valid coordinate.");
    }

    #[test]
    fn unreachable_backend_is_retryable() {
        let message = ErrorPresenter::new().present(&RouteError::connection(
            "http://localhost:1",
            io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        ));
        assert!(message.retryable);
        assert!(message.to_string().contains("Could not reach"));
    }
}
