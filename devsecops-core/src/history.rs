//! In-memory session history, standing in for the browser when there is none.

use crate::route::Route;
use crate::store::{FragmentSink, RouteStore};

/// A linear stack of fragments with a cursor, like a browser tab's session
/// history. Writing while the cursor is behind the newest entry discards the
/// forward entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl MemoryHistory {
    #[must_use]
    pub fn new(initial: &str) -> Self {
        Self {
            entries: vec![initial.to_string()],
            cursor: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn position(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Step back, returning the fragment the platform would now report.
    pub fn back(&mut self) -> Option<String> {
        self.cursor = self.cursor.checked_sub(1)?;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward, returning the fragment the platform would now report.
    pub fn forward(&mut self) -> Option<String> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// A hand-edited address bar: pushes like a write and returns the
    /// fragment to deliver as a change notification.
    pub fn set_external(&mut self, fragment: &str) -> String {
        self.write_fragment(fragment);
        fragment.to_string()
    }
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new("")
    }
}

impl FragmentSink for MemoryHistory {
    fn read_fragment(&self) -> String {
        self.entries[self.cursor].clone()
    }

    fn write_fragment(&mut self, fragment: &str) {
        if self.entries[self.cursor] == fragment {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(fragment.to_string());
        self.cursor += 1;
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

impl RouteStore<MemoryHistory> {
    /// Browser back: move the history cursor and deliver the fragment change.
    pub fn go_back(&mut self) -> Option<&Route> {
        let fragment = self.sink_mut().back()?;
        Some(self.handle_fragment_change(&fragment))
    }

    /// Browser forward.
    pub fn go_forward(&mut self) -> Option<&Route> {
        let fragment = self.sink_mut().forward()?;
        Some(self.handle_fragment_change(&fragment))
    }

    /// Manual address-bar edit.
    pub fn edit_address_bar(&mut self, fragment: &str) -> &Route {
        let fragment = self.sink_mut().set_external(fragment);
        self.handle_fragment_change(&fragment)
    }
}
