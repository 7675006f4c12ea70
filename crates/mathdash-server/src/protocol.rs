//! WebSocket wire protocol. Every frame is a JSON text frame tagged by
//! `event`. Broadcasts reuse [`GameEvent`](mathdash_common::GameEvent),
//! which carries the same tag.

use mathdash_common::SubmissionResult;
use serde::{Deserialize, Serialize};

/// Frames a participant sends.
#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ClientMessage {
    #[serde(rename_all = "camelCase")]
    Join {
        username: String,
        #[serde(default)]
        user_id: Option<String>,
    },

    /// `answer` stays untyped so a string or null can be rejected with a
    /// useful message instead of a parse failure.
    #[serde(rename_all = "camelCase")]
    SubmitAnswer {
        answer: serde_json::Value,
        #[serde(default)]
        timestamp: Option<f64>,
    },

    Ping,
}

/// Direct replies to one connection.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
pub enum ServerMessage {
    #[serde(rename_all = "camelCase")]
    Joined {
        user_id: String,
        username: String,
        participant_count: usize,
    },

    AnswerResult(SubmissionResult),

    Pong,

    Error { message: String },
}

impl ServerMessage {
    pub fn error(message: impl Into<String>) -> Self {
        ServerMessage::Error {
            message: message.into(),
        }
    }
}
