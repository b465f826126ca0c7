//! Browser bindings: canvas surface, interval scheduler, pointer input

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, PointerEvent, Window};

use crate::driver::{Scheduler, TickFn};
use crate::error::StageError;
use crate::renderer::{StrokeStyle, Surface};

/// Element id reused if the host page already has a canvas
pub const CANVAS_ID: &str = "canvas";

fn js_err(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub fn window() -> Result<Window, StageError> {
    web_sys::window().ok_or(StageError::MissingBrowserObject("window"))
}

pub fn document() -> Result<Document, StageError> {
    window()?
        .document()
        .ok_or(StageError::MissingBrowserObject("document"))
}

/// Viewport size in CSS pixels
pub fn viewport_size(window: &Window) -> Result<(f32, f32), StageError> {
    let read = |value: Result<JsValue, JsValue>, what: &'static str| {
        value
            .ok()
            .and_then(|v| v.as_f64())
            .ok_or(StageError::MissingBrowserObject(what))
    };
    let width = read(window.inner_width(), "viewport width")?;
    let height = read(window.inner_height(), "viewport height")?;
    Ok((width as f32, height as f32))
}

/// Find `#canvas` or create one under `<body>`, then size it.
pub fn mount_canvas(document: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, StageError> {
    let canvas: HtmlCanvasElement = match document.get_element_by_id(CANVAS_ID) {
        Some(el) => el
            .dyn_into()
            .map_err(|_| StageError::Canvas(format!("#{CANVAS_ID} is not a canvas")))?,
        None => {
            let el = document
                .create_element("canvas")
                .map_err(|e| StageError::Canvas(js_err(e)))?;
            el.set_id(CANVAS_ID);
            let body = document
                .body()
                .ok_or(StageError::MissingBrowserObject("body"))?;
            body.append_child(&el)
                .map_err(|e| StageError::Canvas(js_err(e)))?;
            el.dyn_into()
                .map_err(|_| StageError::Canvas("created element is not a canvas".into()))?
        }
    };
    canvas.set_width(width);
    canvas.set_height(height);
    Ok(canvas)
}

/// Canvas 2D context as a [`Surface`]
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    size: Vec2,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, StageError> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| StageError::Canvas(js_err(e)))?
            .ok_or_else(|| StageError::Canvas("2d context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| StageError::Canvas("context is not 2d".into()))?;
        Ok(Self {
            ctx,
            size: Vec2::new(canvas.width() as f32, canvas.height() as f32),
        })
    }
}

impl Surface for CanvasSurface {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn clear(&mut self, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, self.size.x as f64, self.size.y as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, offset: Vec2) {
        if let Err(e) = self.ctx.translate(offset.x as f64, offset.y as f64) {
            log::warn!("translate failed: {}", js_err(e));
        }
    }

    fn rotate(&mut self, angle: f32) {
        if let Err(e) = self.ctx.rotate(angle as f64) {
            log::warn!("rotate failed: {}", js_err(e));
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, style: &StrokeStyle) {
        self.ctx.set_stroke_style_str(&style.color);
        self.ctx.set_line_width(style.width as f64);
        self.ctx.set_line_cap(style.cap.as_str());
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }
}

/// A live `setInterval` timer and the closure it calls
pub struct IntervalHandle {
    id: i32,
    closure: Closure<dyn FnMut()>,
}

/// `window.setInterval` / `clearInterval`
pub struct IntervalScheduler {
    window: Window,
    /// Closures of cleared timers. A timer may be cleared from inside its own
    /// callback, so the closure is only dropped on the next `set_interval`.
    retired: Vec<Closure<dyn FnMut()>>,
}

impl IntervalScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            retired: Vec::new(),
        }
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalHandle;

    fn set_interval(&mut self, interval_ms: u32, tick: TickFn) -> Result<IntervalHandle, StageError> {
        self.retired.clear();
        let closure = Closure::wrap(tick);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref::<js_sys::Function>(),
                interval_ms as i32,
            )
            .map_err(|e| StageError::Timer(js_err(e)))?;
        Ok(IntervalHandle { id, closure })
    }

    fn clear_interval(&mut self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.id);
        self.retired.push(handle.closure);
    }
}

/// Call `on_press` for every pointer-down on `canvas`, for the page lifetime
pub fn on_pointer_down(canvas: &HtmlCanvasElement, mut on_press: impl FnMut() + 'static) -> Result<(), StageError> {
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| on_press());
    canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())
        .map_err(|e| StageError::Canvas(js_err(e)))?;
    closure.forget();
    Ok(())
}

/// Browser stage, shared between the input handler and the timer
pub type WebStage = crate::stage::Stage<CanvasSurface, IntervalScheduler>;

/// Shared handle used by event closures
pub type SharedStage = Rc<RefCell<WebStage>>;
