use std::cell::RefCell;
use std::rc::Rc;

use spotlight_core::{RevealConfig, RevealOutcome, RevealTracker};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::error::DomError;
use crate::page::{query_all, set_class};

struct RevealState {
    elements: Vec<Element>,
    tracker: RevealTracker,
    visible_class: String,
}

impl RevealState {
    fn handle(&mut self, entry: &IntersectionObserverEntry, observer: &IntersectionObserver) {
        let target = entry.target();
        let Some(id) = self.elements.iter().position(|el| *el == target) else {
            return;
        };
        let ratio = entry.intersection_ratio() as f32;
        if self.tracker.on_intersection(id, entry.is_intersecting(), ratio) == RevealOutcome::Revealed {
            set_class(&target, &self.visible_class, true);
            observer.unobserve(&target);
        }
    }
}

/// Flags each tagged element once it first scrolls into view, then stops
/// watching it.
pub struct RevealObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl RevealObserver {
    /// Observe every element matching `config.selector`. `None` when there
    /// is nothing to reveal.
    pub fn observe(document: &Document, config: &RevealConfig) -> Result<Option<Self>, DomError> {
        let elements = query_all::<Element>(document, &config.selector)?;
        if elements.is_empty() {
            return Ok(None);
        }

        let state = Rc::new(RefCell::new(RevealState {
            tracker: RevealTracker::new(elements.len(), config.threshold),
            elements: elements.clone(),
            visible_class: config.visible_class.clone(),
        }));

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let Ok(mut state) = state.try_borrow_mut() else {
                    return;
                };
                for entry in entries.iter() {
                    if let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() {
                        state.handle(&entry, &observer);
                    }
                }
                if state.tracker.is_complete() {
                    observer.disconnect();
                    tracing::debug!("all reveal targets shown");
                }
            },
        );

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold as f64));
        options.set_root_margin(&config.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)
                .map_err(|e| DomError::js("IntersectionObserver", e))?;

        for element in &elements {
            observer.observe(element);
        }
        tracing::debug!(count = elements.len(), threshold = config.threshold, "watching reveal targets");

        Ok(Some(Self {
            observer,
            _callback: callback,
        }))
    }
}

impl Drop for RevealObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
