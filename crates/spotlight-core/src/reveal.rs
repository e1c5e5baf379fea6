use tracing::debug;

/// What an intersection signal did to an element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// First time in view: flag it and stop observing it.
    Revealed,
    /// Already flagged earlier; nothing to do.
    AlreadyVisible,
    /// Still not visible enough.
    Pending,
    /// Not one of the tracked elements.
    Unknown,
}

/// Whether an intersection signal counts as "seen".
///
/// Observers report an entry as intersecting for any overlap at all, so the
/// visible fraction has to reach `threshold` as well.
#[inline]
pub fn meets_threshold(is_intersecting: bool, ratio: f32, threshold: f32) -> bool {
    is_intersecting && ratio >= threshold
}

/// One-shot reveal state per element: pending until first seen, visible
/// forever after.
#[derive(Clone, Debug, Default)]
pub struct RevealTracker {
    visible: Vec<bool>,
    pending: usize,
    threshold: f32,
}

impl RevealTracker {
    pub fn new(count: usize, threshold: f32) -> Self {
        Self {
            visible: vec![false; count],
            pending: count,
            threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Feed one observer entry: `ratio` is the visible fraction of element `id`.
    pub fn on_intersection(&mut self, id: usize, is_intersecting: bool, ratio: f32) -> RevealOutcome {
        let Some(visible) = self.visible.get_mut(id) else {
            return RevealOutcome::Unknown;
        };
        if *visible {
            return RevealOutcome::AlreadyVisible;
        }
        if !meets_threshold(is_intersecting, ratio, self.threshold) {
            return RevealOutcome::Pending;
        }
        *visible = true;
        self.pending -= 1;
        debug!(element = id, ratio, remaining = self.pending, "element revealed");
        RevealOutcome::Revealed
    }

    /// Elements still waiting to be seen.
    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_complete(&self) -> bool {
        self.pending == 0
    }
}
