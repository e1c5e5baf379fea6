use tracing::debug;

use crate::geometry::Bounds;

/// Index of a section in document order.
pub type SectionId = usize;

/// A running per-section effect, torn down exactly once.
pub trait Effect {
    fn destroy(self);
}

/// An effect that failed to start is simply absent.
impl<E: Effect> Effect for Option<E> {
    fn destroy(self) {
        if let Some(effect) = self {
            effect.destroy();
        }
    }
}

/// The page the focus controller drives: section flags, the page-level flag,
/// live geometry, and the effect attached to a focused section.
pub trait Page {
    type Effect: Effect;

    fn section_count(&self) -> usize;
    fn section_bounds(&self, id: SectionId) -> Bounds;
    fn viewport_height(&self) -> f32;
    fn set_section_focused(&mut self, id: SectionId, focused: bool);
    fn set_page_focused(&mut self, focused: bool);
    fn spawn_effect(&mut self, id: SectionId) -> Self::Effect;
}

/// Result of a focus request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange {
    /// Already focused, or not a section.
    Unchanged,
    /// Focus moved to the section, replacing `previous` if there was one.
    Moved { previous: Option<SectionId> },
}

/// What a click on a section did. Either way the click must not reach the
/// page-level handler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Focused,
    /// The section was already focused; leave the click to normal
    /// interaction such as text selection.
    Interact,
}

/// Owns the focused section and its effect.
///
/// Invariants: at most one section carries the focused flag, the page flag
/// is set iff a section is focused, and exactly one effect is alive while
/// focused.
pub struct FocusController<E> {
    active: Option<(SectionId, E)>,
}

impl<E> Default for FocusController<E> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<E: Effect> FocusController<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<SectionId> {
        self.active.as_ref().map(|(id, _)| *id)
    }

    pub fn has_focus(&self) -> bool {
        self.active.is_some()
    }

    pub fn focus<P>(&mut self, page: &mut P, id: SectionId) -> FocusChange
    where
        P: Page<Effect = E>,
    {
        if self.focused() == Some(id) || id >= page.section_count() {
            return FocusChange::Unchanged;
        }

        let previous = self.release(page);
        page.set_section_focused(id, true);
        page.set_page_focused(true);
        let effect = page.spawn_effect(id);
        self.active = Some((id, effect));

        debug!(section = id, ?previous, "section focused");
        FocusChange::Moved { previous }
    }

    /// Leave focus mode. Harmless when nothing is focused.
    pub fn unfocus<P>(&mut self, page: &mut P) -> Option<SectionId>
    where
        P: Page<Effect = E>,
    {
        let previous = self.release(page);
        page.set_page_focused(false);
        if let Some(id) = previous {
            debug!(section = id, "focus cleared");
        }
        previous
    }

    pub fn on_section_click<P>(&mut self, page: &mut P, id: SectionId) -> ClickOutcome
    where
        P: Page<Effect = E>,
    {
        if self.focused() == Some(id) {
            ClickOutcome::Interact
        } else {
            self.focus(page, id);
            ClickOutcome::Focused
        }
    }

    pub fn on_background_click<P>(&mut self, page: &mut P)
    where
        P: Page<Effect = E>,
    {
        self.unfocus(page);
    }

    // Destroys the effect and clears every section flag; the page flag is
    // left to the caller.
    fn release<P>(&mut self, page: &mut P) -> Option<SectionId>
    where
        P: Page<Effect = E>,
    {
        let previous = self.active.take().map(|(id, effect)| {
            effect.destroy();
            id
        });
        for section in 0..page.section_count() {
            page.set_section_focused(section, false);
        }
        previous
    }
}
