//! Browser location boundary and a headless implementation.

use std::sync::{Mutex, MutexGuard, PoisonError};

pub trait Location: Send + Sync {
    /// Full current URL, fragment included.
    fn href(&self) -> String;

    /// Current fragment without the leading `#`.
    fn fragment(&self) -> String;

    /// Replace the fragment without adding a history entry.
    fn replace_fragment(&self, fragment: &str);

    /// Assign the fragment, adding a history entry.
    ///
    /// Returns true when the fragment actually changed, which is when a
    /// browser would fire `hashchange`.
    fn assign_fragment(&self, fragment: &str) -> bool;
}

#[derive(Debug)]
struct LocationState {
    fragment: String,
    history: Vec<String>,
}

/// Location held in memory, with a history list.
#[derive(Debug)]
pub struct InMemoryLocation {
    base: String,
    state: Mutex<LocationState>,
}

impl InMemoryLocation {
    /// `base` is the URL without fragment, e.g. `http://127.0.0.1:8080/`.
    pub fn new(base: impl Into<String>, fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            base: base.into(),
            state: Mutex::new(LocationState { history: vec![fragment.clone()], fragment }),
        }
    }

    fn state(&self) -> MutexGuard<'_, LocationState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.state().history.len()
    }
}

impl Location for InMemoryLocation {
    fn href(&self) -> String {
        let fragment = self.fragment();
        if fragment.is_empty() { self.base.clone() } else { format!("{}#{}", self.base, fragment) }
    }

    fn fragment(&self) -> String {
        self.state().fragment.clone()
    }

    fn replace_fragment(&self, fragment: &str) {
        let mut state = self.state();
        state.fragment = fragment.to_string();
        if let Some(last) = state.history.last_mut() {
            *last = fragment.to_string();
        }
    }

    fn assign_fragment(&self, fragment: &str) -> bool {
        let mut state = self.state();
        if state.fragment == fragment {
            return false;
        }
        state.fragment = fragment.to_string();
        state.history.push(fragment.to_string());
        true
    }
}
