//! Remote member directory: record type and the one-shot JSON fetch.
//!
//! The endpoint serves a static JSON array of member objects. The fetch runs
//! once, on a background thread so the UI can render the loading view while
//! the request is in flight, and reports back over an mpsc channel. There is
//! no retry and no cancellation; if the app quits mid-flight the send simply
//! fails and the thread exits.

use serde::Deserialize;
use std::sync::mpsc;

use crate::error::{FetchError, Result};

/// Endpoint used when none is given on the command line.
pub const DEFAULT_ENDPOINT: &str =
    "https://geektrust.s3-ap-southeast-1.amazonaws.com/adminui-problem/members.json";

/// One member record as served by the endpoint, annotated with local
/// selection state. `is_checked` is not part of the wire format and starts
/// out false for every fetched record.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Member {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(skip)]
    pub is_checked: bool,
}

pub struct DirectoryClient {
    endpoint: String,
    http: reqwest::blocking::Client,
}

impl DirectoryClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// GET the member list. Non-success statuses and malformed bodies are
    /// both errors; the caller maps any error to the failed UI state.
    pub fn fetch_members(&self) -> Result<Vec<Member>> {
        tracing::debug!(endpoint = %self.endpoint, "requesting member list");
        let response = self.http.get(&self.endpoint).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(&self.endpoint, status.as_u16()).into());
        }
        let body = response.bytes()?;
        let members: Vec<Member> = serde_json::from_slice(&body)?;
        tracing::info!(count = members.len(), "member list fetched");
        Ok(members)
    }
}

/// Kick off the initial fetch on its own thread. The receiver yields exactly
/// one outcome; the event loop polls it with `try_recv`.
pub fn spawn_fetch(endpoint: String) -> mpsc::Receiver<Result<Vec<Member>>> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let client = DirectoryClient::new(endpoint);
        let outcome = client.fetch_members();
        if let Err(err) = &outcome {
            tracing::warn!(error = %err, "member list fetch failed");
        }
        // Receiver may already be gone if the app quit; nothing to do then.
        let _ = tx.send(outcome);
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_deserializes_with_unchecked_flag() {
        let raw = r#"{"id":"7","name":"Ann Field","email":"ann@mailinator.com","role":"admin"}"#;
        let m: Member = serde_json::from_str(raw).expect("parse member");
        assert_eq!(m.id, "7");
        assert_eq!(m.name, "Ann Field");
        assert_eq!(m.email, "ann@mailinator.com");
        assert_eq!(m.role, "admin");
        assert!(!m.is_checked);
    }

    #[test]
    fn member_array_preserves_server_order() {
        let raw = r#"[
            {"id":"2","name":"B","email":"b@x.com","role":"member"},
            {"id":"1","name":"A","email":"a@x.com","role":"admin"}
        ]"#;
        let members: Vec<Member> = serde_json::from_str(raw).expect("parse array");
        assert_eq!(members[0].id, "2");
        assert_eq!(members[1].id, "1");
    }

    #[test]
    fn unknown_wire_fields_are_ignored() {
        // The endpoint may carry extra fields; only the four we use matter.
        let raw = r#"{"id":"1","name":"A","email":"a@x.com","role":"member","team":"core"}"#;
        let m: Member = serde_json::from_str(raw).expect("parse member");
        assert_eq!(m.id, "1");
    }
}
