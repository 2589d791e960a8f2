//! Trailing-edge debounce for text inputs.
//!
//! Each change arms a new generation; a delayed write only lands if no newer
//! change arrived in the meantime.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use leptos::prelude::*;

/// Generation counter deciding which pending write wins.
#[derive(Debug, Default)]
pub struct DebounceGate {
    generation: AtomicU64,
}

impl DebounceGate {
    /// Start a new wait; earlier generations become stale.
    pub fn arm(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }
}

/// Follow `source` after it has been quiet for `delay_ms`.
pub fn use_debounced(source: Signal<String>, delay_ms: u32) -> ReadSignal<String> {
    let (value, set_value) = signal(source.get_untracked());
    let gate = Arc::new(DebounceGate::default());

    Effect::new(move || {
        let next = source.get();
        if next == value.get_untracked() {
            gate.arm();
            return;
        }
        let generation = gate.arm();
        let gate = gate.clone();
        leptos::task::spawn_local(async move {
            crate::util::time::sleep(delay_ms).await;
            if gate.is_current(generation) {
                set_value.set(next);
            }
        });
    });

    value
}
