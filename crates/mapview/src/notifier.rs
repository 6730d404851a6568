use runtime::event_bus::{Event, EventBus};
use tracing::debug;

use crate::region::{DedupPolicy, Region};
use crate::state::MapViewState;

/// Outcome of announcing the current viewport.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Emission {
    /// Sent to the listener (if any) with this sequence number.
    Emitted(u64),
    /// Within the dedup thresholds of the last announced region.
    Suppressed,
}

impl Emission {
    pub fn is_emitted(self) -> bool {
        matches!(self, Emission::Emitted(_))
    }
}

/// Delivers Region events to an optional external listener.
///
/// With the default `DedupPolicy::Never` every call to [`notify`](Self::notify)
/// produces exactly one event.
#[derive(Debug, Default)]
pub struct RegionNotifier {
    bus: EventBus<Region>,
    policy: DedupPolicy,
    suppressed: u64,
}

impl RegionNotifier {
    pub fn new(policy: DedupPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> DedupPolicy {
        self.policy
    }

    pub fn set_listener(&mut self, listener: impl FnMut(&Region) + 'static) {
        self.bus.set_listener(listener);
    }

    pub fn clear_listener(&mut self) {
        self.bus.clear_listener();
    }

    /// Announces the state's current region and records it as the last one.
    pub fn notify(&mut self, state: &mut MapViewState) -> Emission {
        let region = state.region();
        if self.policy.is_redundant(state.last_region.as_ref(), &region) {
            self.suppressed += 1;
            debug!(?region, "region change suppressed");
            return Emission::Suppressed;
        }

        let seq = self.bus.emit(region);
        state.last_region = Some(region);
        debug!(
            seq,
            lat = region.center.lat,
            lng = region.center.lng,
            radius_km = region.radius_km,
            "region changed"
        );
        Emission::Emitted(seq)
    }

    pub fn emitted(&self) -> u64 {
        self.bus.emitted()
    }

    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Recently emitted regions, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &Event<Region>> {
        self.bus.events()
    }

    pub fn drain(&mut self) -> Vec<Event<Region>> {
        self.bus.drain()
    }
}
