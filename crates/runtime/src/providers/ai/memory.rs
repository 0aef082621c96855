//! Per-entity memory for nodes that need it across ticks.
//!
//! Trees are shared and immutable, so a node that remembers anything keeps
//! it here, in the evaluating entity's context, under a key it received when
//! it was built.
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use arena_core::EntityId;

static NEXT_KEY: AtomicU32 = AtomicU32::new(0);

/// Identifies one stateful node. Unique for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemoryKey(u32);

impl MemoryKey {
    pub fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }
}

/// Schedule and cached result of a throttled target search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchThrottle {
    /// Time until the next search. Zero means search now.
    pub until_next: Duration,
    pub cached: Option<EntityId>,
}

#[derive(Debug, Default)]
pub struct NodeMemory {
    throttles: HashMap<MemoryKey, SearchThrottle>,
}

impl NodeMemory {
    /// The throttle stored under `key`. A new one waits `first()` before its
    /// first search.
    pub fn throttle(
        &mut self,
        key: MemoryKey,
        first: impl FnOnce() -> Duration,
    ) -> &mut SearchThrottle {
        self.throttles.entry(key).or_insert_with(|| SearchThrottle {
            until_next: first(),
            cached: None,
        })
    }

    pub fn peek_throttle(&self, key: MemoryKey) -> Option<&SearchThrottle> {
        self.throttles.get(&key)
    }

    pub fn clear(&mut self) {
        self.throttles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_unique() {
        let a = MemoryKey::next();
        let b = MemoryKey::next();
        assert_ne!(a, b);
    }

    #[test]
    fn first_delay_is_drawn_once() {
        let mut memory = NodeMemory::default();
        let key = MemoryKey::next();
        let throttle = memory.throttle(key, || Duration::from_millis(300));
        assert_eq!(throttle.until_next, Duration::from_millis(300));
        assert_eq!(throttle.cached, None);

        throttle.until_next = Duration::ZERO;
        let again = memory.throttle(key, || Duration::from_secs(9));
        assert_eq!(again.until_next, Duration::ZERO);
    }
}
