//! Browser plumbing: canvas, orientation sensor, page feedback.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use wormhole_input::DeviceOrientation;

/// Samples waiting for the next frame. Older samples are dropped first.
pub type OrientationQueue = Rc<RefCell<VecDeque<DeviceOrientation>>>;

const MAX_QUEUED_SAMPLES: usize = 32;

pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("logger already set: {e}").into());
    }
}

/// A full-window canvas appended to the page body.
pub fn create_canvas() -> Option<HtmlCanvasElement> {
    let document = web_sys::window()?.document()?;
    let canvas = document
        .create_element("canvas")
        .ok()?
        .dyn_into::<HtmlCanvasElement>()
        .ok()?;
    canvas.set_id("wormhole");
    let style = canvas.style();
    for (name, value) in [("width", "100vw"), ("height", "100vh"), ("display", "block")] {
        style.set_property(name, value).ok()?;
    }
    document.body()?.append_child(&canvas).ok()?;
    Some(canvas)
}

/// Forward `deviceorientation` events into a queue the app drains per frame.
pub fn listen_orientation() -> OrientationQueue {
    let queue = OrientationQueue::default();
    let Some(window) = web_sys::window() else {
        return queue;
    };

    let sink = queue.clone();
    let closure = Closure::wrap(Box::new(move |event: web_sys::DeviceOrientationEvent| {
        let sample = DeviceOrientation {
            alpha: event.alpha().map(|a| a as f32),
            beta: event.beta().map(|b| b as f32),
            gamma: event.gamma().map(|g| g as f32),
            screen_angle: screen_angle(),
        };
        let mut queue = sink.borrow_mut();
        if queue.len() == MAX_QUEUED_SAMPLES {
            queue.pop_front();
        }
        queue.push_back(sample);
    }) as Box<dyn FnMut(_)>);

    if window
        .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref())
        .is_err()
    {
        tracing::warn!("cannot listen for device orientation");
    }
    closure.forget();
    queue
}

fn screen_angle() -> f32 {
    web_sys::window()
        .and_then(|w| w.screen().ok())
        .and_then(|s| s.orientation().angle().ok())
        .map_or(0.0, f32::from)
}

/// Mark the page body so stylesheets can show tablet hints.
pub fn set_tablet_class(on: bool) {
    let body = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body());
    if let Some(body) = body {
        if body.class_list().toggle_with_force("tablet", on).is_err() {
            tracing::warn!("cannot update body class");
        }
    }
}

/// Replace the page content with an error message.
pub fn show_error(message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let Some(body) = document.body() else {
        return;
    };
    body.set_text_content(Some(message));
}
