//! Debate handlers: batch and server-sent-event streaming.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures::stream::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use rostrum_models::DebateResult;
use rostrum_orchestrator::{DebateEvent, DebateSession};

use crate::error::Result;
use crate::state::AppState;
use crate::types::DebateRequest;

/// POST /api/debate - Run a debate to completion and return the result.
pub async fn run_debate(
    State(state): State<AppState>,
    Json(request): Json<DebateRequest>,
) -> Result<Json<DebateResult>> {
    info!(topic = %request.topic, "debate requested");

    let settings = request.apply(&state.settings)?;
    let mut session = DebateSession::from_settings(&settings)?;
    let result = session.run(&request.topic).await;

    Ok(Json(result))
}

/// POST /api/debate/stream - Run a debate, streaming events as SSE.
///
/// Setup failures surface as a single terminal `error` event instead of
/// an HTTP error, so consumers handle one wire shape.
pub async fn stream_debate(
    State(state): State<AppState>,
    Json(request): Json<DebateRequest>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    info!(topic = %request.topic, "streaming debate requested");

    let events = spawn_debate(&state, request);
    let stream = ReceiverStream::new(events).map(|event| {
        let sse_event = Event::default().json_data(&event).unwrap_or_else(|e| {
            error!(error = %e, "failed to serialize debate event");
            Event::default().data(r#"{"type":"error","error":"event serialization failed"}"#)
        });
        Ok(sse_event)
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Builds and launches the streaming session, or produces a one-event
/// channel carrying the setup failure.
fn spawn_debate(state: &AppState, request: DebateRequest) -> mpsc::Receiver<DebateEvent> {
    let session = request
        .apply(&state.settings)
        .and_then(|settings| DebateSession::from_settings(&settings).map_err(Into::into));

    match session {
        Ok(session) => session.stream(request.topic),
        Err(e) => {
            error!(error = %e, "failed to start streaming debate");
            let (tx, rx) = mpsc::channel(1);
            let _ = tx.try_send(DebateEvent::Error {
                error: e.to_string(),
            });
            rx
        }
    }
}
