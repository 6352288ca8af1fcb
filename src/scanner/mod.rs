use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::lifecycle;
use crate::store::Store;


/// Spawns the periodic expiry sweep. Only one sweep runs at a time: the loop
/// asks for the next tick after the previous sweep finished, and a missed
/// tick is delayed rather than bunched up.
pub fn spawn(store: Arc<Store>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            sweep(&store).await;
        }
    })
}

/// Resolves every open giveaway whose end time has been reached. Returns how
/// many were closed this pass; anything expiring between ticks is picked up
/// on the next one.
pub async fn sweep(store: &Store) -> usize {
    let mut store = store.lock().await;
    let now = Utc::now().with_timezone(&store.tz);
    let due = store.registry.expired_ids(now);

    let mut closed = 0;
    for id in due {
        // A manual close may have won the race since the scan; that is fine.
        if lifecycle::resolve_giveaway(&mut store, id).is_some() {
            closed += 1;
        }
    }
    if closed > 0 {
        tracing::info!(closed, "expiry sweep resolved giveaways");
    }
    closed
}
