use axum::{
    extract::{FromRequest, Multipart, Query, Request, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Form, Router,
};
use serde::Deserialize;

use crate::errors::WikiError;
use crate::routing::{edit_path, route_path, Operation, Route};
use crate::templates::{EDIT, VIEW};
use crate::types::{AppState, Page, Title};
use crate::utils::escape_html;

/// Body shown in the editor for a page that has never been saved
pub const PLACEHOLDER_BODY: &str = "Please insert your text...";

/// Name of the form field holding the page text
const BODY_FIELD: &str = "body";

#[derive(Debug, Default, Deserialize)]
struct FormFields {
    body: Option<String>,
}

/// Build the application router. Every path goes through [`handle_request`].
pub fn build_router(state: AppState) -> Router {
    Router::new().fallback(handle_request).with_state(state)
}

/// Single entry point: parse the path, then hand the title to its operation
pub async fn handle_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, WikiError> {
    log::info!("Handling {} {}", request.method(), request.uri().path());
    let route = route_path(request.uri().path());
    let method = request.method().clone();
    let body = if matches!(route, Route::Page(Operation::Save, _)) {
        match read_submitted_body(request, &state).await {
            Ok(body) => body,
            Err(rejection) => return Ok(rejection),
        }
    } else {
        Vec::new()
    };
    dispatch(&state, route, &method, body)
}

/// Pull the `body` field out of a save request.
///
/// Posted fields (urlencoded or multipart) win over the query string. A request
/// that carries no `body` anywhere yields an empty body; a payload that cannot
/// be read is rejected so nothing gets overwritten.
async fn read_submitted_body(request: Request, state: &AppState) -> Result<Vec<u8>, Response> {
    let from_query = match Query::<FormFields>::try_from_uri(request.uri()) {
        Ok(Query(fields)) => fields.body,
        Err(rejection) => {
            log::debug!("Ignoring undecodable query string: {}", rejection);
            None
        }
    };

    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();
    let is_read_only = is_get_or_head(request.method());

    let posted = if content_type.starts_with("multipart/form-data") {
        read_multipart_body(request, state).await?
    } else if content_type.starts_with("application/x-www-form-urlencoded") && !is_read_only {
        let Form(fields) = Form::<FormFields>::from_request(request, state)
            .await
            .map_err(|rejection| {
                log::warn!("Rejecting save form: {}", rejection);
                rejection.into_response()
            })?;
        fields.body.map(String::into_bytes)
    } else {
        None
    };

    Ok(posted
        .or_else(|| from_query.map(String::into_bytes))
        .unwrap_or_default())
}

async fn read_multipart_body(request: Request, state: &AppState) -> Result<Option<Vec<u8>>, Response> {
    let mut multipart = Multipart::from_request(request, state).await.map_err(|rejection| {
        log::warn!("Rejecting multipart save: {}", rejection);
        rejection.into_response()
    })?;
    let mut body = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        log::warn!("Bad multipart field: {}", e);
        e.into_response()
    })? {
        if body.is_none() && field.name() == Some(BODY_FIELD) {
            let bytes = field.bytes().await.map_err(|e| {
                log::warn!("Could not read multipart body field: {}", e);
                e.into_response()
            })?;
            body = Some(bytes.to_vec());
        }
    }
    Ok(body)
}

/// Run the operation a parsed route names
pub fn dispatch(
    state: &AppState,
    route: Route,
    method: &Method,
    body: Vec<u8>,
) -> Result<Response, WikiError> {
    match route {
        Route::Page(Operation::View, title) => view_page(state, &title),
        Route::Page(Operation::Edit, title) => edit_page(state, &title),
        Route::Page(Operation::Save, title) => save_page(state, &title, method, body),
        Route::Invalid => {
            log::warn!("Rejecting request with no matching route");
            Err(WikiError::InvalidPath)
        }
    }
}

/// Show a page, or a 404 naming the file that is missing
pub fn view_page(state: &AppState, title: &Title) -> Result<Response, WikiError> {
    match state.store.load(title) {
        Ok(page) => render(state, VIEW, &page),
        Err(_) => Ok((
            StatusCode::NOT_FOUND,
            Html(format!("<h1>Failed to find {}.txt.</h1>", title)),
        )
            .into_response()),
    }
}

/// Show the editor, pre-filled with the stored body or the placeholder
pub fn edit_page(state: &AppState, title: &Title) -> Result<Response, WikiError> {
    let page = state
        .store
        .load(title)
        .unwrap_or_else(|_| Page::new(title.clone(), PLACEHOLDER_BODY));
    render(state, EDIT, &page)
}

/// Store the submitted body and redirect to the editor.
///
/// The redirect target is the same whether or not the write succeeded; only the
/// status differs (302 vs 500).
pub fn save_page(
    state: &AppState,
    title: &Title,
    method: &Method,
    body: Vec<u8>,
) -> Result<Response, WikiError> {
    let page = Page::new(title.clone(), body);
    let status = match state.store.save(&page) {
        Ok(()) => StatusCode::FOUND,
        Err(e) => {
            log::error!("Failed to save {}: {}", title, e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    Ok(redirect(&edit_path(title), status, method))
}

fn render(state: &AppState, template: &str, page: &Page) -> Result<Response, WikiError> {
    let html = state.templates.render(template, page).map_err(|e| {
        log::error!("Failed to render {} for {}: {}", template, page.title, e);
        e
    })?;
    Ok(Html(html).into_response())
}

fn is_get_or_head(method: &Method) -> bool {
    *method == Method::GET || *method == Method::HEAD
}

/// Redirect to `location`. Only GET and HEAD get a short HTML body with the link.
fn redirect(location: &str, status: StatusCode, method: &Method) -> Response {
    let headers = [(header::LOCATION, location.to_string())];
    if is_get_or_head(method) {
        let reason = status.canonical_reason().unwrap_or_default();
        let body = format!("<a href=\"{}\">{}</a>.\n", escape_html(location), reason);
        (status, headers, Html(body)).into_response()
    } else {
        (status, headers).into_response()
    }
}
