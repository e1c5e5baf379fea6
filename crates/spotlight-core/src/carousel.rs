use tracing::trace;

use crate::focus::{Effect, FocusController, Page, SectionId};

/// Index of the centre closest to `viewport_center`.
///
/// Ties go to the first one in iteration order. `None` when there are no
/// centres.
pub fn nearest_section<I>(viewport_center: f32, centers: I) -> Option<usize>
where
    I: IntoIterator<Item = f32>,
{
    let mut best: Option<(usize, f32)> = None;
    for (index, center) in centers.into_iter().enumerate() {
        let distance = (center - viewport_center).abs();
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Moves focus to whichever section is centred in the viewport while focus
/// mode is on.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScrollCarousel;

impl ScrollCarousel {
    pub fn new() -> Self {
        Self
    }

    /// Handle one scroll event. Returns the newly focused section, if focus
    /// moved. Every call rescans the live bounds of all sections.
    pub fn on_scroll<P, E>(
        &self,
        controller: &mut FocusController<E>,
        page: &mut P,
    ) -> Option<SectionId>
    where
        P: Page<Effect = E>,
        E: Effect,
    {
        if !controller.has_focus() {
            return None;
        }

        let viewport_center = page.viewport_height() * 0.5;
        let centers: Vec<f32> = (0..page.section_count())
            .map(|id| page.section_bounds(id).center_y())
            .collect();
        let nearest = nearest_section(viewport_center, centers)?;

        if controller.focused() == Some(nearest) {
            return None;
        }
        trace!(section = nearest, viewport_center, "carousel advancing");
        controller.focus(page, nearest);
        Some(nearest)
    }
}
