//! Request path grammar: `/(view|edit|save)/<title>`.

use crate::types::Title;

/// The three things a client can do to a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    View,
    Edit,
    Save,
}

impl Operation {
    fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "view" => Some(Operation::View),
            "edit" => Some(Operation::Edit),
            "save" => Some(Operation::Save),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::View => "view",
            Operation::Edit => "edit",
            Operation::Save => "save",
        }
    }
}

/// Outcome of parsing a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Page(Operation, Title),
    /// Unknown operation, bad title, or malformed path. Deliberately not split further.
    Invalid,
}

/// Parse a request path. The whole path must match; there is no prefix matching.
pub fn parse_route(path: &str) -> Route {
    let Some(rest) = path.strip_prefix('/') else {
        return Route::Invalid;
    };
    let Some((op, title)) = rest.split_once('/') else {
        return Route::Invalid;
    };
    match (Operation::from_segment(op), Title::parse(title)) {
        (Some(op), Some(title)) => Route::Page(op, title),
        _ => Route::Invalid,
    }
}

/// Percent-decode a raw request path, then parse it.
///
/// A path that does not decode to UTF-8 is `Invalid`.
pub fn route_path(raw: &str) -> Route {
    match urlencoding::decode(raw) {
        Ok(decoded) => parse_route(&decoded),
        Err(_) => Route::Invalid,
    }
}

/// Path of the editor for `title`
pub fn edit_path(title: &Title) -> String {
    format!("/{}/{}", Operation::Edit.as_str(), title)
}
