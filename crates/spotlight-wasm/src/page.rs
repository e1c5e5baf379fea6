use spotlight_core::{Bounds, FieldConfig, FocusConfig, Page, SectionId};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, Window};

use crate::canvas::CanvasField;
use crate::error::DomError;

/// Every element matching `selector`, in document order.
pub fn query_all<T: JsCast>(document: &Document, selector: &str) -> Result<Vec<T>, DomError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|e| DomError::js("querySelectorAll", e))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect())
}

/// Toggle `class` on `element`, logging instead of failing.
pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        tracing::warn!(class, error = %DomError::js("classList.toggle", e), "class not updated");
    }
}

/// The live document as seen by the focus controller.
pub struct DomPage {
    window: Window,
    body: HtmlElement,
    sections: Vec<HtmlElement>,
    focus: FocusConfig,
    field: FieldConfig,
}

impl DomPage {
    pub fn new(window: Window, focus: FocusConfig, field: FieldConfig) -> Result<Self, DomError> {
        let document = window.document().ok_or(DomError::NoDocument)?;
        let body = document.body().ok_or(DomError::NoBody)?;
        let sections = query_all::<HtmlElement>(&document, &focus.section_selector)?;
        Ok(Self {
            window,
            body,
            sections,
            focus,
            field,
        })
    }

    pub fn sections(&self) -> &[HtmlElement] {
        &self.sections
    }
}

impl Page for DomPage {
    type Effect = Option<CanvasField>;

    fn section_count(&self) -> usize {
        self.sections.len()
    }

    fn section_bounds(&self, id: SectionId) -> Bounds {
        let rect = self.sections[id].get_bounding_client_rect();
        Bounds::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        )
    }

    fn viewport_height(&self) -> f32 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0) as f32
    }

    fn set_section_focused(&mut self, id: SectionId, focused: bool) {
        set_class(&self.sections[id], &self.focus.focused_class, focused);
    }

    fn set_page_focused(&mut self, focused: bool) {
        set_class(&self.body, &self.focus.page_class, focused);
    }

    fn spawn_effect(&mut self, id: SectionId) -> Option<CanvasField> {
        match CanvasField::mount(&self.window, &self.sections[id], self.field.clone()) {
            Ok(field) => Some(field),
            Err(e) => {
                tracing::warn!(section = id, error = %e, "particle field failed to mount");
                None
            }
        }
    }
}
