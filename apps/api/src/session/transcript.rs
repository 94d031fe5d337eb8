//! Ordered transcript log and its formatter.
//!
//! The vendor streams assistant output as fragments punctuated by
//! voice-input boundaries; finalized transcript events arrive whole. The
//! formatter merges each fragment run into one logical utterance without
//! reordering anything.

use crate::session::events::TranscriptRole;

/// One entry in the session-scoped log. Held in memory for the duration of a
/// call, formatted at call end, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    Transcript {
        role: TranscriptRole,
        text: String,
        is_final: bool,
    },
    ModelOutput {
        text: String,
    },
    VoiceInput,
}

#[derive(Debug, Default)]
pub struct TranscriptLog {
    events: Vec<LogEvent>,
}

impl TranscriptLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: LogEvent) {
        self.events.push(event);
    }

    /// Renders the log as role-prefixed lines:
    /// - finalized transcript events emit a line immediately;
    /// - model-output fragments accumulate and flush as a single trimmed
    ///   assistant line at the next voice-input boundary or end-of-log,
    ///   whichever comes first;
    /// - partial transcript events are skipped.
    pub fn format(&self) -> String {
        let mut lines: Vec<String> = Vec::new();
        let mut pending = String::new();

        for event in &self.events {
            match event {
                LogEvent::Transcript {
                    role,
                    text,
                    is_final: true,
                } => lines.push(format!("{}: {}", role.label(), text.trim())),
                LogEvent::Transcript { is_final: false, .. } => {}
                LogEvent::ModelOutput { text } => pending.push_str(text),
                LogEvent::VoiceInput => flush_pending(&mut lines, &mut pending),
            }
        }
        flush_pending(&mut lines, &mut pending);

        lines.join("\n")
    }
}

fn flush_pending(lines: &mut Vec<String>, pending: &mut String) {
    let merged = pending.trim();
    if !merged.is_empty() {
        lines.push(format!(
            "{}: {merged}",
            TranscriptRole::Assistant.label()
        ));
    }
    pending.clear();
}
