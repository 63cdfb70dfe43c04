//! Notifier protocol types.
//!
//! Defines the JSON protocol used for communication between hometask and
//! notifier binaries over stdin/stdout. Any executable that speaks it can
//! be a backend.

use serde::{Deserialize, Serialize};

/// Commands that notifier backends must implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Schedule,
    Cancel,
}

/// Request sent to the notifier.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the notifier.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_format() {
        let request = Request {
            command: Command::Schedule,
            params: serde_json::json!({"eventId": "1-0"}),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["command"], "schedule");
        assert_eq!(json["params"]["eventId"], "1-0");
    }

    #[test]
    fn response_parses_both_branches() {
        let ok: Response<String> =
            serde_json::from_str(r#"{"status":"success","data":"handle-1"}"#).unwrap();
        assert!(matches!(ok, Response::Success { data } if data == "handle-1"));

        let err: Response<String> =
            serde_json::from_str(r#"{"status":"error","error":"denied"}"#).unwrap();
        assert!(matches!(err, Response::Error { error } if error == "denied"));
    }
}
