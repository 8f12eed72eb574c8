use std::fmt;
use std::sync::Arc;

use crate::services::PageStore;
use crate::templates::TemplateSet;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: PageStore,
    pub templates: Arc<TemplateSet>,
}

impl AppState {
    pub fn new(store: PageStore, templates: TemplateSet) -> Self {
        Self { store, templates: Arc::new(templates) }
    }
}

/// A page title: non-empty and ASCII alphanumeric only.
///
/// The title doubles as the file stem under the document root, so holding a
/// `Title` means the name is safe to join onto a path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Title(String);

impl Title {
    /// Validate a raw title, returning `None` if it contains anything but `[a-zA-Z0-9]`
    pub fn parse(raw: &str) -> Option<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_alphanumeric()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wiki page, built fresh for every request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub title: Title,
    pub body: Vec<u8>,
}

impl Page {
    pub fn new(title: Title, body: impl Into<Vec<u8>>) -> Self {
        Self { title, body: body.into() }
    }
}
