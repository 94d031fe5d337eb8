//! The WebSocket bridge between the conductor and the browser-held vendor SDK.
//!
//! The server owns the session state machine; the client owns the audio. The
//! bridge performs the dual-source readiness join, relays `start`/`stop`
//! commands outward and vendor events inward, and on call end runs the
//! transcript through feedback generation before closing.

use std::time::Instant;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::Response,
    Extension,
};
use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::auth::client::resolve_profile;
use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::feedback::evaluator::evaluate_transcript;
use crate::feedback::store::insert_feedback;
use crate::interview::store::fetch_by_id;
use crate::session::conductor::{Command, SessionConductor, SessionOutcome};
use crate::session::events::{ClientControl, InboundFrame, OutboundFrame, ParticipantInfo};
use crate::session::instruction::{build_start_request, StartRequest};
use crate::state::AppState;

/// GET /api/interviews/:id/session
///
/// Upgrades to the live-session socket. Both asynchronous dependencies (the
/// stored interview definition and the caller's display profile) are joined
/// here, once, before the vendor session is allowed to start; a missing
/// interview fails the upgrade with a plain HTTP error.
pub async fn handle_session_ws(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(interview_id): Path<Uuid>,
    ws: WebSocketUpgrade,
) -> Result<Response, AppError> {
    let (interview, profile) = tokio::try_join!(fetch_by_id(&state.db, interview_id), async {
        Ok::<_, AppError>(
            resolve_profile(
                &state.db,
                user.user_id,
                &user.email,
                user.avatar_url.as_deref(),
            )
            .await,
        )
    })?;

    let questions = interview.question_items()?;
    let request = build_start_request(&profile, &interview, &questions);
    let participant = ParticipantInfo {
        username: profile.username,
        avatar_url: profile.avatar_url,
        email: profile.email,
    };

    info!(
        "Opening live session for interview {interview_id} ({})",
        participant.email
    );
    Ok(ws.on_upgrade(move |socket| run_session(socket, state, interview_id, participant, request)))
}

async fn run_session(
    socket: WebSocket,
    state: AppState,
    interview_id: Uuid,
    participant: ParticipantInfo,
    request: StartRequest,
) {
    let (mut sink, mut stream) = socket.split();
    let (command_tx, mut commands) = mpsc::unbounded_channel();
    let mut conductor = SessionConductor::new(command_tx);

    // Both dependencies resolved before the upgrade; start immediately.
    conductor.begin(request);

    loop {
        tokio::select! {
            command = commands.recv() => {
                let Some(command) = command else { break };
                if !send_frame(&mut sink, &frame_for(command, &participant)).await {
                    break;
                }
            }
            incoming = stream.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let done = handle_text(
                            &text,
                            &mut conductor,
                            &mut sink,
                            &state,
                            interview_id,
                            &participant.email,
                        )
                        .await;
                        if done {
                            break;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {} // binary and ping/pong frames are not part of the protocol
                    Some(Err(e)) => {
                        warn!("Session socket error for interview {interview_id}: {e}");
                        break;
                    }
                }
            }
        }
    }

    // Teardown from whatever phase we are in; the conductor guarantees the
    // vendor stop is emitted at most once across the whole session.
    info!(
        "Live session for interview {interview_id} closing from phase {}",
        conductor.phase().as_str()
    );
    conductor.shutdown();
    while let Ok(command) = commands.try_recv() {
        if !send_frame(&mut sink, &frame_for(command, &participant)).await {
            break;
        }
    }
}

/// Processes one text frame. Returns true when the session is finished and
/// the socket should close.
async fn handle_text(
    text: &str,
    conductor: &mut SessionConductor,
    sink: &mut SplitSink<WebSocket, Message>,
    state: &AppState,
    interview_id: Uuid,
    email: &str,
) -> bool {
    let frame = match serde_json::from_str::<InboundFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            warn!("Unrecognized session frame for interview {interview_id}: {e}");
            return false;
        }
    };

    let mut outcome: Option<SessionOutcome> = None;
    match frame {
        InboundFrame::Control(ClientControl::ToggleMute) => conductor.toggle_mute(),
        InboundFrame::Control(ClientControl::HangUp) => conductor.hang_up(),
        InboundFrame::Vendor(event) => {
            outcome = conductor.handle_event(event, Instant::now());
        }
    }

    let snapshot = conductor.snapshot(Instant::now());
    send_frame(sink, &OutboundFrame::State { state: snapshot }).await;

    if let Some(outcome) = outcome {
        finish_session(sink, state, interview_id, email, outcome).await;
        return true;
    }
    false
}

/// Call completed: score the formatted transcript, persist the feedback
/// record, and push the result to the client.
async fn finish_session(
    sink: &mut SplitSink<WebSocket, Message>,
    state: &AppState,
    interview_id: Uuid,
    email: &str,
    outcome: SessionOutcome,
) {
    if outcome.transcript.trim().is_empty() {
        info!("Interview {interview_id} ended with an empty transcript; skipping evaluation");
        return;
    }

    match evaluate_transcript(&state.llm, &outcome.transcript).await {
        Ok(scores) => {
            if let Err(e) = insert_feedback(&state.db, interview_id, email, &scores).await {
                error!("Failed to store feedback for interview {interview_id}: {e}");
            }
            send_frame(sink, &OutboundFrame::Feedback { feedback: scores }).await;
        }
        Err(e) => {
            error!("Feedback generation failed for interview {interview_id}: {e}");
            send_frame(
                sink,
                &OutboundFrame::Error {
                    message: "Failed to evaluate the interview transcript.".to_string(),
                },
            )
            .await;
        }
    }
}

fn frame_for(command: Command, participant: &ParticipantInfo) -> OutboundFrame {
    match command {
        Command::Start(request) => OutboundFrame::Start {
            request: *request,
            participant: participant.clone(),
        },
        Command::Stop => OutboundFrame::Stop,
    }
}

async fn send_frame(sink: &mut SplitSink<WebSocket, Message>, frame: &OutboundFrame) -> bool {
    let json = match serde_json::to_string(frame) {
        Ok(json) => json,
        Err(e) => {
            error!("Failed to serialize outbound session frame: {e}");
            return false;
        }
    };
    sink.send(Message::Text(json)).await.is_ok()
}
