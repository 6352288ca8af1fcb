use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::types::{Giveaway, GiveawayId};

/// Everything the front end needs to produce or update an announcement.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct GiveawayView {
    pub id: GiveawayId,
    #[schema(example = "Nitro Classic")]
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: u32,
    pub participant_count: usize,
    /// End time formatted in the process-wide offset, e.g.
    /// "2024-01-01 05:30 PM (UTC+01:00)".
    pub ends_at: String,
    pub entry_point: String,
    pub message_ref: Option<String>,
}

impl GiveawayView {
    pub fn of(giveaway: &Giveaway) -> Self {
        GiveawayView {
            id: giveaway.id,
            prize: giveaway.prize.clone(),
            description: giveaway.description.clone(),
            winner_count: giveaway.winner_count,
            participant_count: giveaway.participants.len(),
            ends_at: giveaway
                .expires_at
                .format("%Y-%m-%d %I:%M %p (UTC%:z)")
                .to_string(),
            entry_point: giveaway.entry_point.clone(),
            message_ref: giveaway.message_ref.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nobody entered before the window closed.
    NoParticipants,
    Winners(Vec<String>),
}

/// Final announcement data for a resolved giveaway.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct ResolutionNotice {
    pub id: GiveawayId,
    pub prize: String,
    pub entry_point: String,
    pub message_ref: Option<String>,
    pub total_participants: usize,
    pub outcome: Outcome,
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct RenderError(pub String);

/// Render hook the lifecycle calls after every state change. By the time an
/// implementation runs, the registry mutation is already committed; a render
/// failure is logged by the caller and never rolls anything back.
pub trait Render: Send + Sync {
    fn giveaway_updated(&self, view: &GiveawayView) -> Result<(), RenderError>;
    fn giveaway_resolved(&self, notice: &ResolutionNotice) -> Result<(), RenderError>;
}

/// Default renderer: writes announcements to the log. Stands in for the chat
/// front end when none is attached.
pub struct LogRender;

impl Render for LogRender {
    fn giveaway_updated(&self, view: &GiveawayView) -> Result<(), RenderError> {
        tracing::info!(
            id = %view.id,
            prize = %view.prize,
            winner_count = view.winner_count,
            participant_count = view.participant_count,
            ends_at = %view.ends_at,
            entry_point = %view.entry_point,
            "giveaway announcement updated"
        );
        Ok(())
    }

    fn giveaway_resolved(&self, notice: &ResolutionNotice) -> Result<(), RenderError> {
        match &notice.outcome {
            Outcome::NoParticipants => tracing::info!(
                id = %notice.id,
                prize = %notice.prize,
                "giveaway ended with no participants"
            ),
            Outcome::Winners(winners) => tracing::info!(
                id = %notice.id,
                prize = %notice.prize,
                total_participants = notice.total_participants,
                winners = ?winners,
                "giveaway ended"
            ),
        }
        Ok(())
    }
}
