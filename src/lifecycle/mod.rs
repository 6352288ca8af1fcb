use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::render::{GiveawayView, Outcome, ResolutionNotice};
use crate::select;
use crate::store::StoreInternal;
use crate::timeparse::{self, TimeParseError};
use crate::types::{Giveaway, GiveawayId};


pub const PRIZE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Error, PartialEq)]
pub enum CreateError {
    #[error("prize must be 1-100 characters")]
    InvalidPrize,
    #[error("description must be at most 500 characters")]
    InvalidDescription,
    #[error("number of winners must be a positive integer")]
    InvalidWinnerCount,
    #[error("invalid end time: {0}")]
    InvalidExpiry(#[from] TimeParseError),
    #[error("entry point already has an open giveaway (id {0})")]
    AlreadyActive(GiveawayId),
}

pub struct CreateRequest {
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: i64,
    pub end_time: String,
    pub entry_point: String,
    pub message_ref: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq, Eq)]
pub enum EntryOutcome {
    Joined { participant_count: usize },
    AlreadyEntered { participant_count: usize },
}

/// Validates the request, registers a fresh giveaway, and announces it.
/// Nothing is registered when any validation fails.
pub fn create_giveaway(
    store: &mut StoreInternal,
    request: CreateRequest,
    now: DateTime<FixedOffset>,
) -> Result<GiveawayView, CreateError> {
    if request.prize.is_empty() || request.prize.chars().count() > PRIZE_MAX_CHARS {
        return Err(CreateError::InvalidPrize);
    }
    if let Some(description) = &request.description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(CreateError::InvalidDescription);
        }
    }
    let winner_count = u32::try_from(request.winner_count)
        .ok()
        .filter(|count| *count >= 1)
        .ok_or(CreateError::InvalidWinnerCount)?;
    let expires_at = timeparse::parse_end_time(&request.end_time, now)?;

    if let Some(existing) = store.registry.find_by_entry_point(&request.entry_point) {
        return Err(CreateError::AlreadyActive(existing));
    }

    let id = store.registry.allocate_id();
    let giveaway = Giveaway {
        id,
        prize: request.prize,
        description: request.description,
        winner_count,
        expires_at,
        entry_point: request.entry_point,
        message_ref: request.message_ref,
        participants: Default::default(),
    };
    let view = GiveawayView::of(&giveaway);
    store.registry.insert(giveaway);
    tracing::info!(%id, ends_at = %view.ends_at, "giveaway opened");

    if let Err(error) = store.renderer.giveaway_updated(&view) {
        tracing::warn!(%id, %error, "announcement render failed; giveaway stays open");
    }
    Ok(view)
}

/// Adds a participant to an open giveaway. Entry is idempotent: a repeat
/// entry reports `AlreadyEntered` and leaves the roster untouched. `None`
/// means the giveaway is unknown or already resolved.
pub fn enter_giveaway(
    store: &mut StoreInternal,
    id: GiveawayId,
    participant: &str,
) -> Option<EntryOutcome> {
    let giveaway = store.registry.get_mut(id)?;
    let joined = giveaway.participants.insert(participant.to_string());
    let participant_count = giveaway.participants.len();
    if !joined {
        return Some(EntryOutcome::AlreadyEntered { participant_count });
    }

    let view = GiveawayView::of(giveaway);
    tracing::debug!(%id, participant_count, "participant joined");
    if let Err(error) = store.renderer.giveaway_updated(&view) {
        tracing::warn!(%id, %error, "announcement render failed; entry stays committed");
    }
    Some(EntryOutcome::Joined { participant_count })
}

/// Closes a giveaway: removes it from the registry first, then draws winners
/// from the removed snapshot. Only the caller that wins the removal gets a
/// notice; every later call for the same id observes `None`, which makes the
/// scanner/manual-close race benign.
pub fn resolve_giveaway(store: &mut StoreInternal, id: GiveawayId) -> Option<ResolutionNotice> {
    let giveaway = store.registry.remove(id)?;

    let total_participants = giveaway.participants.len();
    let outcome = if total_participants == 0 {
        Outcome::NoParticipants
    } else {
        let count = (giveaway.winner_count as usize).min(total_participants);
        Outcome::Winners(select::select_winners(&giveaway.participants, count))
    };
    let notice = ResolutionNotice {
        id,
        prize: giveaway.prize,
        entry_point: giveaway.entry_point,
        message_ref: giveaway.message_ref,
        total_participants,
        outcome,
    };
    tracing::info!(%id, total_participants, "giveaway resolved");

    if let Err(error) = store.renderer.giveaway_resolved(&notice) {
        tracing::warn!(%id, %error, "result render failed; giveaway stays resolved");
    }
    Some(notice)
}

/// Closes the oldest open giveaway announced at the given entry point.
pub fn resolve_entry_point(
    store: &mut StoreInternal,
    entry_point: &str,
) -> Option<ResolutionNotice> {
    let id = store.registry.find_by_entry_point(entry_point)?;
    resolve_giveaway(store, id)
}
