use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::{Rc, Weak};

use glam::Vec2;
use spotlight_core::{Effect, FieldConfig, FrameGate, FrameHandle, ParticleField, Rgba, Size, Surface};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use crate::error::DomError;
use crate::listener::Listener;

const CANVAS_STYLE: &str = "position:absolute;inset:0;pointer-events:none;";

/// [`Surface`] over a 2D canvas context.
pub struct Canvas2d<'a>(pub &'a CanvasRenderingContext2d);

impl Surface for Canvas2d<'_> {
    fn clear(&mut self, size: Size) {
        self.0
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, colour: Rgba) {
        let ctx = self.0;
        ctx.begin_path();
        ctx.move_to(from.x as f64, from.y as f64);
        ctx.line_to(to.x as f64, to.y as f64);
        ctx.set_stroke_style_str(&colour.to_string());
        ctx.stroke();
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgba) {
        let ctx = self.0;
        ctx.begin_path();
        // Only throws for a negative radius, which the config rejects.
        let _ = ctx.arc(centre.x as f64, centre.y as f64, radius as f64, 0.0, TAU);
        ctx.set_fill_style_str(&colour.to_string());
        ctx.fill();
    }
}

/// Simulation plus the canvas it paints on.
struct FieldHost {
    field: ParticleField,
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl FieldHost {
    fn measure(&mut self) {
        let size = container_size(&self.container);
        self.canvas.set_width(size.width as u32);
        self.canvas.set_height(size.height as u32);
        self.field.resize(size);
    }

    fn track_pointer(&mut self, event: &MouseEvent) {
        let rect = self.canvas.get_bounding_client_rect();
        self.field.set_pointer(Vec2::new(
            (event.client_x() as f64 - rect.left()) as f32,
            (event.client_y() as f64 - rect.top()) as f32,
        ));
    }

    fn frame(&mut self) {
        self.field.step(&mut Canvas2d(&self.ctx));
    }
}

struct FrameState {
    gate: RefCell<FrameGate>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

/// `requestAnimationFrame` chain that reschedules itself every frame until
/// stopped. A frame that was already queued when the loop stopped returns
/// without touching the host.
struct FrameLoop {
    window: Window,
    state: Rc<FrameState>,
}

impl FrameLoop {
    fn start(window: Window, host: Rc<RefCell<FieldHost>>) -> Result<Self, DomError> {
        let state = Rc::new(FrameState {
            gate: RefCell::new(FrameGate::new()),
            callback: RefCell::new(None),
        });

        let weak: Weak<FrameState> = Rc::downgrade(&state);
        let frame_window = window.clone();
        let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if !state.gate.borrow_mut().begin_frame() {
                return;
            }
            match host.try_borrow_mut() {
                Ok(mut host) => host.frame(),
                Err(_) => tracing::warn!("particle field busy, frame skipped"),
            }
            if let Err(e) = schedule(&frame_window, &state) {
                tracing::warn!(error = %e, "animation loop stopped");
            }
        });
        *state.callback.borrow_mut() = Some(callback);
        schedule(&window, &state)?;

        Ok(Self { window, state })
    }

    fn stop(&self) {
        let pending = self.state.gate.borrow_mut().stop();
        if let Some(handle) = pending {
            cancel(&self.window, handle);
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.state.callback.borrow_mut().take();
    }
}

fn schedule(window: &Window, state: &FrameState) -> Result<(), DomError> {
    let callback = state.callback.borrow();
    let Some(callback) = callback.as_ref() else {
        return Ok(());
    };
    let handle = window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .map_err(|e| DomError::js("requestAnimationFrame", e))?;
    if !state.gate.borrow_mut().scheduled(handle) {
        cancel(window, handle);
    }
    Ok(())
}

fn cancel(window: &Window, handle: FrameHandle) {
    if let Err(e) = window.cancel_animation_frame(handle) {
        tracing::warn!(error = %DomError::js("cancelAnimationFrame", e), "frame not cancelled");
    }
}

fn container_size(container: &HtmlElement) -> Size {
    Size::new(container.client_width() as f32, container.client_height() as f32)
}

/// Particle background mounted inside one section.
///
/// Dropping it (or [`Effect::destroy`]) stops the frame loop, detaches the
/// window listeners and removes the canvas.
pub struct CanvasField {
    canvas: HtmlCanvasElement,
    frames: Option<FrameLoop>,
    listeners: Vec<Listener>,
}

impl CanvasField {
    pub fn mount(
        window: &Window,
        container: &HtmlElement,
        config: FieldConfig,
    ) -> Result<Self, DomError> {
        let document = window.document().ok_or(DomError::NoDocument)?;
        let canvas: HtmlCanvasElement = document
            .create_element("canvas")
            .map_err(|e| DomError::js("createElement", e))?
            .dyn_into()
            .map_err(|_| DomError::NoContext)?;
        canvas.style().set_css_text(CANVAS_STYLE);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .map_err(|e| DomError::js("getContext", e))?
            .ok_or(DomError::NoContext)?
            .dyn_into()
            .map_err(|_| DomError::NoContext)?;

        container
            .insert_before(&canvas, container.first_child().as_ref())
            .map_err(|e| DomError::js("insertBefore", e))?;

        let size = container_size(container);
        let field = ParticleField::new(size, config, &mut rand::thread_rng());
        let particles = field.particles.len();
        let host = Rc::new(RefCell::new(FieldHost {
            field,
            container: container.clone(),
            canvas: canvas.clone(),
            ctx,
        }));
        host.borrow_mut().measure();

        // Owned pieces are dropped (and detached) if a later step fails.
        let mut mounted = Self {
            canvas,
            frames: None,
            listeners: Vec::with_capacity(2),
        };

        let pointer_host = Rc::clone(&host);
        mounted.listeners.push(Listener::new(window, "mousemove", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            if let Ok(mut host) = pointer_host.try_borrow_mut() {
                host.track_pointer(event);
            }
        })?);

        let resize_host = Rc::clone(&host);
        mounted.listeners.push(Listener::new(window, "resize", move |_| {
            if let Ok(mut host) = resize_host.try_borrow_mut() {
                host.measure();
            }
        })?);

        mounted.frames = Some(FrameLoop::start(window.clone(), host)?);

        tracing::info!(
            particles,
            width = size.width,
            height = size.height,
            "particle field mounted"
        );
        Ok(mounted)
    }
}

impl Drop for CanvasField {
    fn drop(&mut self) {
        self.frames.take();
        self.listeners.clear();
        self.canvas.remove();
        tracing::debug!("particle field torn down");
    }
}

impl Effect for CanvasField {
    fn destroy(self) {
        drop(self);
    }
}
