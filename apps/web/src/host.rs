use powermatch::kernel::mount::MountHost;

/// The page document the client renders into.
#[derive(Debug)]
pub(crate) struct BrowserHost {
    #[cfg(target_arch = "wasm32")]
    document: Option<web_sys::Document>,
}

#[cfg(target_arch = "wasm32")]
impl BrowserHost {
    pub(crate) fn current() -> Self {
        Self { document: web_sys::window().and_then(|window| window.document()) }
    }
}

#[cfg(target_arch = "wasm32")]
impl MountHost for BrowserHost {
    fn has_anchor(&self, anchor: &str) -> bool {
        self.document.as_ref().is_some_and(|document| document.get_element_by_id(anchor).is_some())
    }

    fn launch(&self, anchor: &str) {
        use dioxus::prelude::LaunchBuilder;

        LaunchBuilder::web().with_cfg(dioxus::web::Config::new().rootname(anchor)).launch(crate::App);
    }
}

/// Routes `window.onerror` into the fault reporter.
///
/// Returns `false` if there is no window or the handler is already installed.
#[cfg(target_arch = "wasm32")]
pub(crate) fn install_script_fault_handler() -> bool {
    use powermatch::kernel::fault::{FaultSink, TracingSink};
    use std::sync::atomic::{AtomicBool, Ordering};
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::{JsCast, JsValue};

    static INSTALLED: AtomicBool = AtomicBool::new(false);

    fn text(value: &JsValue) -> Option<String> {
        if value.is_null() || value.is_undefined() {
            None
        } else {
            Some(value.as_string().unwrap_or_else(|| format!("{value:?}")))
        }
    }

    let Some(window) = web_sys::window() else {
        return false;
    };
    if INSTALLED.swap(true, Ordering::AcqRel) {
        return false;
    }

    let handler = Closure::<dyn FnMut(JsValue, JsValue, JsValue, JsValue, JsValue)>::new(
        |message: JsValue, source: JsValue, line: JsValue, column: JsValue, error: JsValue| {
            let report = crate::fault::script_fault(
                message.as_string(),
                source.as_string(),
                line.as_f64(),
                column.as_f64(),
                text(&error),
            );
            TracingSink.record(&report);
        },
    );
    window.set_onerror(Some(handler.as_ref().unchecked_ref()));
    // The page owns the handler from here on.
    handler.forget();
    true
}

#[cfg(not(target_arch = "wasm32"))]
impl BrowserHost {
    pub(crate) const fn current() -> Self {
        Self {}
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) const fn install_script_fault_handler() -> bool {
    false
}

/// Outside the browser there is no document, so no anchor.
#[cfg(not(target_arch = "wasm32"))]
impl MountHost for BrowserHost {
    fn has_anchor(&self, _anchor: &str) -> bool {
        false
    }

    fn launch(&self, anchor: &str) {
        tracing::warn!(anchor, "No document to launch into");
    }
}
