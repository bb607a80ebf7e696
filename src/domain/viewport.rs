//! Viewport-driven active section tracking
//!
//! Each rendered module section is observed against a band of the viewport
//! (by default the top half). Observation results arrive in batches; the last
//! intersecting section in a batch becomes the active module. A batch with no
//! intersecting section leaves the previous choice in place.

use crate::domain::content::ModuleId;
use crate::domain::core::{Insets, Rect};
use serde::Serialize;
use std::collections::HashMap;

/// Host side of section observation
///
/// Implemented by whatever renders the sections. The tracker calls it to
/// attach and release per-section observers.
pub trait SectionObserver {
    fn observe(&mut self, module_id: ModuleId);
    fn unobserve(&mut self, module_id: ModuleId);
}

/// Region of the viewport in which a section counts as "in view"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    insets: Insets,
}

impl ViewportBand {
    pub fn new(insets: Insets) -> Self {
        Self { insets }
    }

    /// The top half of the viewport
    pub fn top_half() -> Self {
        Self::new(Insets::new(0.0, 0.0, 0.5, 0.0))
    }

    pub fn insets(&self) -> Insets {
        self.insets
    }

    /// The band's rectangle inside `viewport`
    pub fn region(&self, viewport: Rect) -> Rect {
        viewport.inset_fraction(&self.insets)
    }

    /// A section is in view while it overlaps the band
    pub fn contains(&self, viewport: Rect, section: Rect) -> bool {
        section.intersection(&self.region(viewport)).is_some()
    }
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self::top_half()
    }
}

/// Rendered bounds of one module section, viewport-relative
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    pub module_id: ModuleId,
    pub bounds: Rect,
}

/// One observation: a section entered or left the band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntersectionEntry {
    pub module_id: ModuleId,
    pub is_intersecting: bool,
}

impl IntersectionEntry {
    pub fn entered(module_id: ModuleId) -> Self {
        Self {
            module_id,
            is_intersecting: true,
        }
    }

    pub fn left(module_id: ModuleId) -> Self {
        Self {
            module_id,
            is_intersecting: false,
        }
    }
}

/// Tracks subscriptions and the single active module
#[derive(Debug, Clone, Default)]
pub struct ViewportTracker {
    band: ViewportBand,
    /// Subscribed sections in document order
    sections: Vec<ModuleId>,
    /// Last reported state per subscribed section
    intersecting: HashMap<ModuleId, bool>,
    active: Option<ModuleId>,
}

impl ViewportTracker {
    pub fn new(band: ViewportBand) -> Self {
        Self {
            band,
            ..Self::default()
        }
    }

    pub fn band(&self) -> ViewportBand {
        self.band
    }

    pub fn active_module_id(&self) -> Option<ModuleId> {
        self.active
    }

    /// Currently subscribed sections, in document order
    pub fn sections(&self) -> &[ModuleId] {
        &self.sections
    }

    pub fn is_observing(&self, module_id: ModuleId) -> bool {
        self.sections.contains(&module_id)
    }

    /// Re-subscribes when the rendered section sequence changed
    ///
    /// All prior subscriptions are released before the new set is attached.
    /// Returns true if a re-subscription happened.
    pub fn sync_sections(
        &mut self,
        sections: &[ModuleId],
        host: &mut impl SectionObserver,
    ) -> bool {
        if self.sections == sections {
            return false;
        }

        self.release(host);
        for id in sections {
            host.observe(*id);
        }
        self.sections = sections.to_vec();

        tracing::debug!(count = sections.len(), "re-subscribed module sections");
        true
    }

    /// Releases every subscription
    pub fn release(&mut self, host: &mut impl SectionObserver) {
        for id in self.sections.drain(..) {
            host.unobserve(id);
        }
        self.intersecting.clear();
    }

    /// Computes the batch the observing mechanism would deliver for a layout
    ///
    /// An entry is produced for every subscribed section whose in-view state
    /// changed (or was not known yet). Sections without a layout are skipped.
    pub fn observe_layout(
        &mut self,
        viewport: Rect,
        layouts: &[SectionLayout],
    ) -> Vec<IntersectionEntry> {
        let bounds: HashMap<ModuleId, Rect> =
            layouts.iter().map(|l| (l.module_id, l.bounds)).collect();

        let mut batch = Vec::new();
        for id in &self.sections {
            let Some(section) = bounds.get(id) else {
                continue;
            };
            let in_view = self.band.contains(viewport, *section);
            let previous = self.intersecting.insert(*id, in_view);
            if previous != Some(in_view) {
                batch.push(IntersectionEntry {
                    module_id: *id,
                    is_intersecting: in_view,
                });
            }
        }
        batch
    }

    /// Applies one observation batch
    ///
    /// Entries for sections that are no longer subscribed are ignored.
    pub fn apply_batch(&mut self, batch: &[IntersectionEntry]) -> Option<ModuleId> {
        for entry in batch {
            if !self.is_observing(entry.module_id) {
                tracing::trace!(module = %entry.module_id, "ignoring entry for stale section");
                continue;
            }
            self.intersecting.insert(entry.module_id, entry.is_intersecting);
            if entry.is_intersecting {
                self.active = Some(entry.module_id);
            }
        }
        self.active
    }

    /// Drops the active id if it names `module_id`
    pub fn forget(&mut self, module_id: ModuleId) {
        if self.active == Some(module_id) {
            self.active = None;
        }
    }
}
