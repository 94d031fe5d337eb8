//! Wire model for the live-session WebSocket: vendor events relayed by the
//! client, local call controls, and the frames the server pushes back.

use serde::{Deserialize, Serialize};

use crate::feedback::models::FeedbackScores;
use crate::session::instruction::StartRequest;

/// Speaker identity on transcript events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptRole {
    Assistant,
    User,
}

impl TranscriptRole {
    pub fn label(self) -> &'static str {
        match self {
            TranscriptRole::Assistant => "Assistant",
            TranscriptRole::User => "User",
        }
    }
}

/// Finality of a transcript event. A message without the flag is taken as a
/// complete utterance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranscriptType {
    #[default]
    Final,
    Partial,
}

/// One vendor-emitted notification describing speech or text activity during
/// a live session, as relayed by the browser-held SDK.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum VendorEvent {
    SpeechStart,
    SpeechEnd,
    #[serde(rename_all = "camelCase")]
    Message {
        role: TranscriptRole,
        transcript: String,
        #[serde(default)]
        transcript_type: TranscriptType,
    },
    ModelOutput {
        output: String,
    },
    VoiceInput,
    CallEnd,
    Error {
        #[serde(default)]
        message: String,
    },
}

/// Local call controls issued by the participant's UI.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientControl {
    ToggleMute,
    HangUp,
}

/// Anything the client may send on the session socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum InboundFrame {
    Control(ClientControl),
    Vendor(VendorEvent),
}

/// Participant identity for the in-call layout (name card, avatar, footer).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantInfo {
    pub username: String,
    pub avatar_url: Option<String>,
    pub email: String,
}

/// Frames the server pushes to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundFrame {
    /// Start the vendor session with the assembled request.
    Start {
        request: StartRequest,
        participant: ParticipantInfo,
    },
    /// Stop the vendor session.
    Stop,
    /// Current conductor state, pushed after every processed frame.
    State { state: StateSnapshot },
    /// The scored evaluation, pushed once after call end.
    Feedback { feedback: FeedbackScores },
    Error { message: String },
}

/// What the in-call UI needs to render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateSnapshot {
    pub phase: String,
    pub assistant_speaking: bool,
    pub assistant_active: bool,
    pub user_active: bool,
    pub self_muted: bool,
}
