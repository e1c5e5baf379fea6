use std::cell::RefCell;
use std::rc::Rc;

use spotlight_core::{FocusController, ScrollCarousel, SpotlightConfig};
use wasm_bindgen::prelude::*;

mod canvas;
mod error;
mod listener;
mod logging;
mod page;
mod reveal;

pub use canvas::CanvasField;
pub use error::DomError;

use listener::Listener;
use page::DomPage;
use reveal::RevealObserver;

#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Focus state shared with the event handlers.
struct FocusState {
    controller: FocusController<Option<CanvasField>>,
    page: DomPage,
    carousel: ScrollCarousel,
}

impl FocusState {
    fn section_click(&mut self, id: usize) {
        self.controller.on_section_click(&mut self.page, id);
    }

    fn background_click(&mut self) {
        self.controller.on_background_click(&mut self.page);
    }

    fn focus(&mut self, id: usize) {
        self.controller.focus(&mut self.page, id);
    }

    fn unfocus(&mut self) {
        self.controller.unfocus(&mut self.page);
    }

    fn scroll(&mut self) {
        self.carousel.on_scroll(&mut self.controller, &mut self.page);
    }
}

/// Page coordinator: owns the reveal observer, the focus controller with its
/// active particle field, and every listener it attached.
#[wasm_bindgen]
pub struct Spotlight {
    config: SpotlightConfig,
    window: web_sys::Window,
    state: Rc<RefCell<FocusState>>,
    reveal: Option<RevealObserver>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl Spotlight {
    /// Build from an optional JSON config; omitted keys take their defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Spotlight, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => SpotlightConfig::from_json(json).map_err(DomError::from)?,
            None => SpotlightConfig::default(),
        };
        logging::init(&config.log_level);

        let window = web_sys::window().ok_or(DomError::NoWindow)?;
        let page = DomPage::new(window.clone(), config.focus.clone(), config.field.clone())?;
        tracing::info!(sections = page.sections().len(), "spotlight created");

        Ok(Spotlight {
            config,
            window,
            state: Rc::new(RefCell::new(FocusState {
                controller: FocusController::new(),
                page,
                carousel: ScrollCarousel::new(),
            })),
            reveal: None,
            listeners: Vec::new(),
        })
    }

    /// Start the reveal observer and attach the click and scroll handlers.
    /// Mounting twice replaces the previous wiring.
    pub fn mount(&mut self) -> Result<(), JsValue> {
        self.detach();
        let document = self.window.document().ok_or(DomError::NoDocument)?;

        self.reveal = RevealObserver::observe(&document, &self.config.reveal)?;

        let sections = self.state.borrow().page.sections().to_vec();
        for (id, section) in sections.iter().enumerate() {
            let state = Rc::clone(&self.state);
            self.listeners.push(Listener::new(section, "click", move |event| {
                event.stop_propagation();
                match state.try_borrow_mut() {
                    Ok(mut state) => state.section_click(id),
                    Err(_) => tracing::warn!(section = id, "focus busy, click dropped"),
                }
            })?);
        }

        let state = Rc::clone(&self.state);
        self.listeners.push(Listener::new(&document, "click", move |_| {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.background_click();
            }
        })?);

        let state = Rc::clone(&self.state);
        self.listeners.push(Listener::new(&self.window, "scroll", move |_| {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.scroll();
            }
        })?);

        tracing::debug!(listeners = self.listeners.len(), "spotlight mounted");
        Ok(())
    }

    /// Detach everything and leave focus mode.
    pub fn unmount(&mut self) {
        self.detach();
        self.unfocus();
    }

    /// Focus the section at `index` (document order). Out-of-range indices
    /// are ignored.
    pub fn focus(&mut self, index: usize) {
        self.state.borrow_mut().focus(index);
    }

    pub fn unfocus(&mut self) {
        self.state.borrow_mut().unfocus();
    }

    pub fn focused_index(&self) -> Option<usize> {
        self.state.borrow().controller.focused()
    }

    pub fn section_count(&self) -> usize {
        self.state.borrow().page.sections().len()
    }
}

impl Spotlight {
    fn detach(&mut self) {
        self.listeners.clear();
        self.reveal = None;
    }
}

impl Drop for Spotlight {
    fn drop(&mut self) {
        self.unmount();
    }
}
