use crate::domain::{
    chart::{ChartContainer, Dimensions, ResizeEvents},
    errors::{ChartError, ChartResult},
    logging::LogComponent,
};
use crate::log_warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, HtmlElement, Window};

const RESIZE_EVENT: &str = "resize";

impl ChartContainer for HtmlElement {
    fn client_size(&self) -> Dimensions {
        Dimensions::new(self.client_width().max(0) as u32, self.client_height().max(0) as u32)
    }
}

/// `resize` listeners on the browser window.
#[derive(Clone)]
pub struct WindowResizeEvents {
    window: Window,
}

impl WindowResizeEvents {
    pub fn new() -> ChartResult<Self> {
        let window = web_sys::window().ok_or_else(|| ChartError::rendering("window is not available"))?;
        Ok(Self { window })
    }
}

/// Registered listener. Holds the exact closure handed to the window so the
/// same function object can be removed again.
pub struct ResizeListener {
    callback: Closure<dyn FnMut(Event)>,
}

impl ResizeEvents for WindowResizeEvents {
    type Subscription = ResizeListener;

    fn subscribe(&self, mut on_resize: Box<dyn FnMut()>) -> ResizeListener {
        let callback = Closure::wrap(Box::new(move |_event: Event| on_resize()) as Box<dyn FnMut(Event)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(true);
        if let Err(e) = self.window.add_event_listener_with_callback_and_add_event_listener_options(
            RESIZE_EVENT,
            callback.as_ref().unchecked_ref(),
            &options,
        ) {
            log_warn!(LogComponent::Infrastructure("WindowResize"), "⚠️ addEventListener failed: {:?}", e);
        }

        ResizeListener { callback }
    }

    fn unsubscribe(&self, subscription: ResizeListener) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback(RESIZE_EVENT, subscription.callback.as_ref().unchecked_ref())
        {
            log_warn!(LogComponent::Infrastructure("WindowResize"), "⚠️ removeEventListener failed: {:?}", e);
        }
    }
}
