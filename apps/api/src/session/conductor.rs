//! The session finite-state machine.
//!
//! One authoritative phase variable; transitions happen only on named events.
//! The conductor never talks to the vendor directly: it emits `Start`/`Stop`
//! commands on a channel, and the WebSocket bridge relays them to the
//! browser-held SDK.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

use crate::session::events::{StateSnapshot, TranscriptRole, TranscriptType, VendorEvent};
use crate::session::instruction::StartRequest;
use crate::session::transcript::{LogEvent, TranscriptLog};

/// How long a party's speaking indicator stays lit after a message event.
const SPEAKING_INDICATOR: Duration = Duration::from_secs(2);

/// Commands relayed to the vendor SDK.
#[derive(Debug)]
pub enum Command {
    Start(Box<StartRequest>),
    Stop,
}

/// The session lifecycle. `Idle` is both the pre-construction state and the
/// post-teardown resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Initializing,
    Starting,
    InCall,
    Ending,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Initializing => "initializing",
            Phase::Starting => "starting",
            Phase::InCall => "in-call",
            Phase::Ending => "ending",
        }
    }
}

/// What a completed call leaves behind.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub transcript: String,
}

pub struct SessionConductor {
    phase: Phase,
    started: bool,
    stopped: bool,
    self_muted: bool,
    assistant_speaking: bool,
    assistant_active_until: Option<Instant>,
    user_active_until: Option<Instant>,
    transcript: TranscriptLog,
    commands: UnboundedSender<Command>,
}

impl SessionConductor {
    /// A fresh conductor for a session whose definition and profile fetches
    /// are in flight.
    pub fn new(commands: UnboundedSender<Command>) -> Self {
        Self {
            phase: Phase::Initializing,
            started: false,
            stopped: false,
            self_muted: false,
            assistant_speaking: false,
            assistant_active_until: None,
            user_active_until: None,
            transcript: TranscriptLog::new(),
            commands,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Starts the vendor session once both asynchronous dependencies have
    /// resolved. Guarded to fire at most once per session attempt; no vendor
    /// acknowledgment is awaited, so the phase moves straight to `InCall`.
    pub fn begin(&mut self, request: StartRequest) {
        if self.started {
            warn!("Session start requested twice; ignoring");
            return;
        }
        self.started = true;
        self.phase = Phase::Starting;
        self.send(Command::Start(Box::new(request)));
        self.phase = Phase::InCall;
    }

    /// Flips the local mute flag. UI state only: no vendor call, no effect on
    /// session liveness, no interaction with the assistant-speaking flag.
    pub fn toggle_mute(&mut self) {
        self.self_muted = !self.self_muted;
    }

    /// Explicit user hang-up: stop the vendor session and begin winding down.
    pub fn hang_up(&mut self) {
        self.stop_vendor();
        self.phase = Phase::Ending;
    }

    /// Teardown. Safe to call from any phase, any number of times; the vendor
    /// stop goes out exactly once for a session that is still live.
    pub fn shutdown(&mut self) {
        self.stop_vendor();
        self.phase = Phase::Idle;
    }

    fn stop_vendor(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.send(Command::Stop);
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            warn!("Session command channel closed; vendor bridge is gone");
        }
    }

    /// Feeds one relayed vendor event into the state machine. Returns the
    /// session outcome when the event ends the call.
    pub fn handle_event(&mut self, event: VendorEvent, now: Instant) -> Option<SessionOutcome> {
        match event {
            VendorEvent::SpeechStart => {
                self.assistant_speaking = true;
                None
            }
            VendorEvent::SpeechEnd => {
                self.assistant_speaking = false;
                None
            }
            VendorEvent::Message {
                role,
                transcript,
                transcript_type,
            } => {
                let until = now + SPEAKING_INDICATOR;
                match role {
                    TranscriptRole::Assistant => self.assistant_active_until = Some(until),
                    TranscriptRole::User => self.user_active_until = Some(until),
                }
                self.transcript.push(LogEvent::Transcript {
                    role,
                    text: transcript,
                    is_final: transcript_type == TranscriptType::Final,
                });
                None
            }
            VendorEvent::ModelOutput { output } => {
                self.transcript.push(LogEvent::ModelOutput { text: output });
                None
            }
            VendorEvent::VoiceInput => {
                self.transcript.push(LogEvent::VoiceInput);
                None
            }
            VendorEvent::CallEnd => {
                // The vendor ended the call; nothing left to stop.
                self.stopped = true;
                self.phase = Phase::Ending;
                self.assistant_speaking = false;
                Some(SessionOutcome {
                    transcript: self.transcript.format(),
                })
            }
            VendorEvent::Error { message } => {
                warn!("Vendor session error: {message}");
                None
            }
        }
    }

    pub fn snapshot(&self, now: Instant) -> StateSnapshot {
        StateSnapshot {
            phase: self.phase.as_str().to_string(),
            assistant_speaking: self.assistant_speaking,
            assistant_active: active(self.assistant_active_until, now),
            user_active: active(self.user_active_until, now),
            self_muted: self.self_muted,
        }
    }
}

fn active(until: Option<Instant>, now: Instant) -> bool {
    until.is_some_and(|t| now < t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    use crate::auth::UserProfile;
    use crate::interview::models::{InterviewRow, QuestionItem};
    use crate::session::instruction::build_start_request;

    fn start_request() -> StartRequest {
        let profile = UserProfile {
            username: "jane".to_string(),
            avatar_url: None,
            email: "jane@example.com".to_string(),
        };
        let interview = InterviewRow {
            interview_id: uuid::Uuid::new_v4(),
            email: "jane@example.com".to_string(),
            company_name: "Acme".to_string(),
            company_description: "A maker of everything.".to_string(),
            job_name: "Backend Engineer".to_string(),
            job_description: "Run services.".to_string(),
            interview_types: vec!["Behavioral".to_string()],
            number_of_questions: "5".to_string(),
            questions: serde_json::json!([]),
            created_at: chrono::Utc::now(),
        };
        let questions = vec![QuestionItem {
            question: "Tell me about a conflict.".to_string(),
            question_type: "Behavioral".to_string(),
        }];
        build_start_request(&profile, &interview, &questions)
    }

    fn conductor() -> (SessionConductor, mpsc::UnboundedReceiver<Command>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (SessionConductor::new(tx), rx)
    }

    fn message(role: TranscriptRole, text: &str) -> VendorEvent {
        VendorEvent::Message {
            role,
            transcript: text.to_string(),
            transcript_type: TranscriptType::Final,
        }
    }

    fn count_stops(rx: &mut mpsc::UnboundedReceiver<Command>) -> usize {
        let mut stops = 0;
        while let Ok(cmd) = rx.try_recv() {
            if matches!(cmd, Command::Stop) {
                stops += 1;
            }
        }
        stops
    }

    #[tokio::test]
    async fn test_begin_fires_start_exactly_once() {
        let (mut conductor, mut rx) = conductor();
        conductor.begin(start_request());
        conductor.begin(start_request());

        assert!(matches!(rx.try_recv(), Ok(Command::Start(_))));
        assert!(rx.try_recv().is_err());
        assert_eq!(conductor.phase(), Phase::InCall);
    }

    #[tokio::test]
    async fn test_teardown_during_initializing_stops_once() {
        let (mut conductor, mut rx) = conductor();
        assert_eq!(conductor.phase(), Phase::Initializing);

        conductor.shutdown();
        conductor.shutdown();

        assert_eq!(count_stops(&mut rx), 1);
        assert_eq!(conductor.phase(), Phase::Idle);
    }

    #[tokio::test]
    async fn test_teardown_during_in_call_stops_once() {
        let (mut conductor, mut rx) = conductor();
        conductor.begin(start_request());
        assert_eq!(conductor.phase(), Phase::InCall);

        conductor.shutdown();
        conductor.shutdown();

        assert_eq!(count_stops(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_hang_up_then_teardown_stops_once_total() {
        let (mut conductor, mut rx) = conductor();
        conductor.begin(start_request());
        conductor.hang_up();
        assert_eq!(conductor.phase(), Phase::Ending);

        conductor.shutdown();

        assert_eq!(count_stops(&mut rx), 1);
    }

    #[tokio::test]
    async fn test_speech_flags_never_touch_self_mute() {
        let (mut conductor, _rx) = conductor();
        conductor.begin(start_request());
        let now = Instant::now();

        conductor.toggle_mute();
        assert!(conductor.snapshot(now).self_muted);

        conductor.handle_event(VendorEvent::SpeechStart, now);
        let snapshot = conductor.snapshot(now);
        assert!(snapshot.assistant_speaking);
        assert!(snapshot.self_muted, "speech-start must not clear mute");

        conductor.handle_event(VendorEvent::SpeechEnd, now);
        let snapshot = conductor.snapshot(now);
        assert!(!snapshot.assistant_speaking);
        assert!(snapshot.self_muted, "speech-end must not clear mute");
    }

    #[tokio::test]
    async fn test_mute_does_not_affect_assistant_speaking() {
        let (mut conductor, _rx) = conductor();
        conductor.begin(start_request());
        let now = Instant::now();

        conductor.handle_event(VendorEvent::SpeechStart, now);
        conductor.toggle_mute();
        assert!(conductor.snapshot(now).assistant_speaking);
    }

    #[tokio::test]
    async fn test_message_lights_speaking_indicator_for_two_seconds() {
        let (mut conductor, _rx) = conductor();
        conductor.begin(start_request());
        let now = Instant::now();

        conductor.handle_event(message(TranscriptRole::User, "Hello"), now);

        let during = conductor.snapshot(now + Duration::from_secs(1));
        assert!(during.user_active);
        assert!(!during.assistant_active);

        let after = conductor.snapshot(now + Duration::from_secs(3));
        assert!(!after.user_active);
    }

    #[tokio::test]
    async fn test_call_end_yields_formatted_transcript() {
        let (mut conductor, _rx) = conductor();
        conductor.begin(start_request());
        let now = Instant::now();

        conductor.handle_event(message(TranscriptRole::Assistant, "Ready?"), now);
        conductor.handle_event(message(TranscriptRole::User, "Yes."), now);
        conductor.handle_event(
            VendorEvent::ModelOutput {
                output: "Great, let's ".to_string(),
            },
            now,
        );
        conductor.handle_event(
            VendorEvent::ModelOutput {
                output: "begin.".to_string(),
            },
            now,
        );
        conductor.handle_event(VendorEvent::VoiceInput, now);

        let outcome = conductor
            .handle_event(VendorEvent::CallEnd, now)
            .expect("call-end must yield an outcome");

        assert_eq!(
            outcome.transcript,
            "Assistant: Ready?\nUser: Yes.\nAssistant: Great, let's begin."
        );
        assert_eq!(conductor.phase(), Phase::Ending);
    }

    #[tokio::test]
    async fn test_call_end_then_teardown_sends_no_further_stop() {
        let (mut conductor, mut rx) = conductor();
        conductor.begin(start_request());
        conductor.handle_event(VendorEvent::CallEnd, Instant::now());

        conductor.shutdown();

        assert_eq!(count_stops(&mut rx), 0, "vendor already ended the call");
    }
}
