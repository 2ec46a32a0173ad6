//! Facade visibility - hiding conduit covers client-side
//!
//! A single process-wide flag controls whether facades render. It is
//! seeded once at startup from config and flipped from one control path
//! (the toggle keybind); there is no concurrent-writer contract. Flipping
//! it reports which render sections hold a facade so the renderer can
//! rebuild exactly those.

use std::sync::atomic::{AtomicBool, Ordering};

use ahash::AHashMap;

use crate::core::types::{BlockPos, SectionPos};
use crate::item::ItemId;

static FACADES_VISIBLE: AtomicBool = AtomicBool::new(true);

/// Seed the flag at startup (before any render queries)
pub fn init_facades_visible(visible: bool) {
    FACADES_VISIBLE.store(visible, Ordering::Relaxed);
}

pub fn facades_visible() -> bool {
    FACADES_VISIBLE.load(Ordering::Relaxed)
}

/// Positions of all facade-bearing conduit bundles
#[derive(Debug, Clone, Default)]
pub struct FacadeIndex {
    facades: AHashMap<BlockPos, ItemId>,
}

impl FacadeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a facade at a position (replacing any previous one)
    pub fn insert(&mut self, pos: BlockPos, facade: ItemId) {
        self.facades.insert(pos, facade);
    }

    /// Remove the facade at a position
    pub fn remove(&mut self, pos: BlockPos) {
        self.facades.remove(&pos);
    }

    pub fn facade_at(&self, pos: BlockPos) -> Option<&ItemId> {
        self.facades.get(&pos)
    }

    pub fn len(&self) -> usize {
        self.facades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facades.is_empty()
    }

    /// Flip facade visibility
    ///
    /// Returns the distinct sections that need a rebuild; setting the
    /// flag to its current value changes nothing and returns nothing.
    pub fn set_facades_visible(&self, visible: bool) -> Vec<SectionPos> {
        if visible == facades_visible() {
            return Vec::new();
        }

        let mut sections: Vec<SectionPos> = Vec::new();
        for pos in self.facades.keys() {
            let section = SectionPos::containing(*pos);
            if !sections.contains(&section) {
                sections.push(section);
            }
        }

        FACADES_VISIBLE.store(visible, Ordering::Relaxed);
        tracing::debug!(visible, sections = sections.len(), "facade visibility changed");
        sections
    }
}
