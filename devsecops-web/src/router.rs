//! Browser plumbing for the route store: the location hash as a
//! [`FragmentSink`] and a scoped `hashchange` subscription.

use devsecops_core::{FragmentSink, MemoryHistory};
#[cfg(target_arch = "wasm32")]
use crate::dom::{self, DomError};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::closure::Closure;
#[cfg(target_arch = "wasm32")]
use web_sys::{HashChangeEvent, Window};

/// `window.location.hash` as seen by the route store.
#[cfg(target_arch = "wasm32")]
pub struct BrowserLocation;

#[cfg(target_arch = "wasm32")]
impl FragmentSink for BrowserLocation {
    fn read_fragment(&self) -> String {
        dom::location_hash().unwrap_or_default()
    }

    fn write_fragment(&mut self, fragment: &str) {
        if let Err(err) = dom::set_location_hash(fragment) {
            log::warn!("failed to write fragment `{fragment}`: {err}");
        }
    }
}

/// Sink for a freshly mounted app. An explicit fragment pins the app to an
/// in-memory history (server rendering, tests); otherwise the browser
/// location is used when there is one.
#[must_use]
pub fn initial_sink(fragment: Option<&str>) -> Box<dyn FragmentSink> {
    match fragment {
        Some(fragment) => Box::new(MemoryHistory::new(fragment)),
        None => platform_sink(),
    }
}

#[cfg(target_arch = "wasm32")]
fn platform_sink() -> Box<dyn FragmentSink> {
    Box::new(BrowserLocation)
}

#[cfg(not(target_arch = "wasm32"))]
fn platform_sink() -> Box<dyn FragmentSink> {
    Box::new(MemoryHistory::default())
}

/// `location.hash` without its leading `#`.
#[cfg(any(target_arch = "wasm32", test))]
fn fragment_of_hash(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}

/// Keeps a `hashchange` listener registered on `window` for as long as the
/// value lives.
#[cfg(target_arch = "wasm32")]
pub struct HashChangeListener {
    target: Window,
    closure: Closure<dyn FnMut(HashChangeEvent)>,
}

#[cfg(target_arch = "wasm32")]
impl HashChangeListener {
    /// Call `on_change` with the live fragment whenever the hash changes.
    ///
    /// Events queued behind a later write still report that write, never the
    /// `new_url` they were dispatched with.
    ///
    /// # Errors
    /// Returns an error when there is no window or registration fails.
    pub fn new(mut on_change: impl FnMut(&str) + 'static) -> Result<Self, DomError> {
        let target = dom::window().ok_or(DomError::NoWindow)?;
        let closure = Closure::wrap(Box::new(move |_: HashChangeEvent| {
            let hash = dom::location_hash().unwrap_or_default();
            on_change(fragment_of_hash(&hash));
        }) as Box<dyn FnMut(HashChangeEvent)>);
        target.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())?;
        Ok(Self { target, closure })
    }
}

#[cfg(target_arch = "wasm32")]
impl Drop for HashChangeListener {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback("hashchange", self.closure.as_ref().unchecked_ref())
        {
            log::warn!("failed to remove hashchange listener: {}", dom::js_error_message(&err));
        }
    }
}
