use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};

use crate::types::{Giveaway, GiveawayId};


/// In-memory store of every currently open giveaway.
///
/// Keyed and ordered by id, so scans (entry-point lookup, expiry sweep)
/// visit giveaways oldest-first.
pub struct GiveawayRegistry {
    next_id: u64,
    open: BTreeMap<GiveawayId, Giveaway>,
}

impl GiveawayRegistry {
    pub fn new() -> Self {
        GiveawayRegistry {
            next_id: 1,
            open: BTreeMap::new(),
        }
    }

    /// Hands out the next id. Ids are monotonic and never reused, even for
    /// giveaways created within the same instant.
    pub fn allocate_id(&mut self) -> GiveawayId {
        let id = GiveawayId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn insert(&mut self, giveaway: Giveaway) {
        self.open.insert(giveaway.id, giveaway);
    }

    pub fn get(&self, id: GiveawayId) -> Option<&Giveaway> {
        self.open.get(&id)
    }

    pub fn get_mut(&mut self, id: GiveawayId) -> Option<&mut Giveaway> {
        self.open.get_mut(&id)
    }

    /// Removes and returns the giveaway, if still open. Once this returns
    /// `None` for an id, it does so forever.
    pub fn remove(&mut self, id: GiveawayId) -> Option<Giveaway> {
        self.open.remove(&id)
    }

    /// Oldest open giveaway announced at the given entry point.
    pub fn find_by_entry_point(&self, entry_point: &str) -> Option<GiveawayId> {
        self.open
            .values()
            .find(|giveaway| giveaway.entry_point == entry_point)
            .map(|giveaway| giveaway.id)
    }

    /// Ids of every open giveaway whose window has elapsed at `now`.
    pub fn expired_ids(&self, now: DateTime<FixedOffset>) -> Vec<GiveawayId> {
        self.open
            .values()
            .filter(|giveaway| now >= giveaway.expires_at)
            .map(|giveaway| giveaway.id)
            .collect()
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }
}
