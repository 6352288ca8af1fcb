use chrono::FixedOffset;
use tokio::sync::Mutex;

use crate::registry::GiveawayRegistry;
use crate::render::Render;

pub struct StoreInternal {
    pub registry: GiveawayRegistry,
    /// Process-wide offset used to resolve "5:30PM" to an absolute instant
    /// and to format end times shown back to users.
    pub tz: FixedOffset,
    pub renderer: Box<dyn Render>,
}

pub type Store = Mutex<StoreInternal>;
