//! Plain-text wiki server.
//!
//! Pages are addressed by alphanumeric titles and stored one `<title>.txt` per
//! page under a configured document root. Requests are routed as
//! `/(view|edit|save)/<title>`.

pub mod config;
pub mod errors;
pub mod fs_utils;
pub mod handlers;
pub mod logger;
pub mod routing;
pub mod services;
pub mod templates;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::Config;
pub use errors::WikiError;
pub use handlers::build_router;
pub use routing::{parse_route, route_path, Operation, Route};
pub use services::PageStore;
pub use templates::TemplateSet;
pub use types::{AppState, Page, Title};
