use js_sys::{Function, Promise};
use log::{Level, LevelFilter, Log, Metadata, Record};
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Window};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("`window` is not available")]
    NoWindow,
    #[error("{0}")]
    Js(String),
}

impl From<JsValue> for DomError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_message(&value))
    }
}

/// Retrieve the global `window` object, if running in a browser.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

#[must_use]
pub fn document() -> Option<Document> {
    window().and_then(|win| win.document())
}

/// Convert a JavaScript value into a readable string for error reporting.
#[must_use]
pub fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|err| err.message().into())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

/// Log an error message to the browser console.
pub fn console_error(message: &str) {
    web_sys::console::error_1(&JsValue::from(message));
}

/// Move keyboard focus to the element with the given `id`.
///
/// # Errors
/// Returns an error when the element is missing or cannot take focus.
pub fn focus_element(id: &str) -> Result<(), DomError> {
    let element = document()
        .and_then(|doc| doc.get_element_by_id(id))
        .ok_or_else(|| DomError::Js(format!("no element `#{id}`")))?;
    element
        .dyn_into::<web_sys::HtmlElement>()
        .map_err(|_| DomError::Js(format!("`#{id}` cannot take focus")))?
        .focus()?;
    Ok(())
}

/// Current `location.hash`, including the leading `#` when present.
#[must_use]
pub fn location_hash() -> Option<String> {
    window().and_then(|win| win.location().hash().ok())
}

/// Set `location.hash`; the browser records a history entry and later fires
/// `hashchange`.
///
/// # Errors
/// Returns an error when there is no window or the browser rejects the write.
pub fn set_location_hash(fragment: &str) -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    win.location().set_hash(fragment)?;
    Ok(())
}

/// Whether the page was opened with `?test=1`.
#[must_use]
pub fn test_mode_enabled() -> bool {
    window()
        .and_then(|win| win.location().search().ok())
        .is_some_and(|search| search.contains("test=1"))
}

/// CSRF token the hosting page publishes as `window.csrf_token`.
#[must_use]
pub fn csrf_token() -> Option<String> {
    let win = window()?;
    js_sys::Reflect::get(&win, &JsValue::from_str("csrf_token"))
        .ok()
        .and_then(|value| value.as_string())
        .filter(|token| !token.is_empty() && token != "None")
}

/// Yield execution for the requested number of milliseconds.
///
/// # Errors
/// Returns an error if the timer cannot be scheduled or the underlying JavaScript promise rejects.
#[allow(clippy::future_not_send)] // Wasm futures rely on `JsFuture`, which is not `Send`.
pub async fn sleep_ms(duration_ms: i32) -> Result<(), DomError> {
    let win = window().ok_or(DomError::NoWindow)?;
    let mut resolve_slot: Option<Function> = None;
    let promise = Promise::new(&mut |resolve, _reject| {
        resolve_slot = Some(resolve);
    });

    let resolve = resolve_slot.ok_or_else(|| DomError::Js("promise resolver missing".into()))?;
    let closure = Closure::once(move || {
        let _ = resolve.call0(&JsValue::UNDEFINED);
    });

    win.set_timeout_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        duration_ms,
    )?;
    closure.forget();

    JsFuture::from(promise).await?;
    Ok(())
}

/// `log` backend writing to the browser console.
pub struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install [`ConsoleLogger`]. Later calls keep the first logger and only
/// adjust the level.
pub fn init_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_err() {
        log::debug!("console logger already installed");
    }
    log::set_max_level(level);
}

fn format_record(record: &Record) -> String {
    format!("[{}] {}: {}", record.level(), record.target(), record.args())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_carry_level_and_target() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("navigate `incidents`"))
                .level(Level::Warn)
                .target("devsecops_core::store")
                .build(),
        );
        assert_eq!(line, "[WARN] devsecops_core::store: navigate `incidents`");
    }

    #[test]
    fn dom_errors_render_their_message() {
        assert_eq!(DomError::NoWindow.to_string(), "`window` is not available");
        assert_eq!(DomError::Js("denied".into()).to_string(), "denied");
    }
}
