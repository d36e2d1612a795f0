//! Run event telemetry
//!
//! One outbound payload shape, posted fire-and-forget by whatever
//! transport the host wires in. Submission must never block or gate a
//! game-state transition; failures are logged locally and dropped, never
//! retried and never surfaced to the player.

use serde::{Deserialize, Serialize};

use crate::session::Session;

/// Event discriminator for the logging endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    GameStart,
    GameEnd,
}

/// JSON body for the logging endpoint (camelCase on the wire)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogPayload {
    pub event_type: EventType,
    pub player_name: String,
    pub session_id: String,
    pub difficulty: String,
    pub level: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub targets_found: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_elapsed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrong_selections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
}

impl LogPayload {
    fn base(event_type: EventType, session: &Session) -> Self {
        Self {
            event_type,
            player_name: session.player_name.clone(),
            session_id: session.run_id.clone(),
            difficulty: session.difficulty.as_str().to_string(),
            level: session.level().name.clone(),
            result: None,
            targets_found: None,
            required_count: None,
            time_elapsed: None,
            wrong_selections: None,
            final_score: None,
        }
    }

    /// Snapshot for the run-start event
    pub fn game_start(session: &Session) -> Self {
        Self::base(EventType::GameStart, session)
    }

    /// Snapshot for the run-end event, counters included
    pub fn game_end(session: &Session) -> Self {
        Self {
            result: Some("win".to_string()),
            targets_found: Some(session.found_count),
            required_count: Some(session.required_count),
            time_elapsed: Some(session.elapsed),
            wrong_selections: Some(session.wrong_selections),
            final_score: Some(session.final_score()),
            ..Self::base(EventType::GameEnd, session)
        }
    }
}

/// Sink for run telemetry
///
/// Implementations swallow their own errors; the core never awaits a
/// response.
pub trait RunLogger {
    fn submit(&self, payload: &LogPayload);
}

/// Drops every payload
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLogger;

impl RunLogger for NullLogger {
    fn submit(&self, _payload: &LogPayload) {}
}

/// Writes payloads to the local log stream instead of the network
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLogger;

impl RunLogger for DebugLogger {
    fn submit(&self, payload: &LogPayload) {
        match serde_json::to_string(payload) {
            Ok(body) => log::info!("telemetry: {body}"),
            Err(e) => log::warn!("telemetry payload dropped: {e}"),
        }
    }
}
