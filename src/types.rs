use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier for a giveaway. Allocated from a per-process counter, so two
/// giveaways created in the same instant can never collide, and an id is
/// never reused for the life of the process.
#[derive(
    Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct GiveawayId(pub u64);

impl fmt::Display for GiveawayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An open giveaway. A giveaway is open exactly as long as it lives in the
/// registry; resolution removes it and works on the removed snapshot, so a
/// resolved giveaway is never observable afterwards.
#[derive(Clone, Debug)]
pub struct Giveaway {
    pub id: GiveawayId,
    pub prize: String,
    pub description: Option<String>,
    pub winner_count: u32,
    pub expires_at: DateTime<FixedOffset>,
    /// Opaque reference to the channel the giveaway is announced in. Stored
    /// verbatim, never interpreted.
    pub entry_point: String,
    /// Opaque handle of the announcement message, for in-place updates.
    pub message_ref: Option<String>,
    pub participants: BTreeSet<String>,
}
