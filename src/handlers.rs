use axum::{
    body::Body,
    extract::{rejection::FormRejection, FromRequest, Path as AxumPath, Request, State},
    http::{header, Method, StatusCode},
    response::{Html, IntoResponse, Response},
    Form,
};
use log::{debug, error, warn};
use serde::Deserialize;

use crate::components::{TemplateComponent, TemplateId};
use crate::errors::WikiError;
use crate::fs_utils::{content_type_for, ensure_safe_path};
use crate::routes::{Operation, Route};
use crate::services::Outcome;
use crate::types::AppState;

/// Form payload posted by the edit page
#[derive(Debug, Default, Deserialize)]
pub struct SaveForm {
    #[serde(default)]
    pub body: String,
}

/// Handle `/` and `/index`: list every page
pub async fn handle_index(State(state): State<AppState>) -> Result<Response, WikiError> {
    let outcome = state.wiki.list().await?;
    respond(&state.templates, outcome)
}

/// Handle `/{view|edit|save}/{name}`; every other path is not found
pub async fn handle_page(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, WikiError> {
    let route = Route::parse(request.uri().path()).map_err(|e| {
        debug!("Rejected path '{}'", request.uri().path());
        e
    })?;
    let method = request.method().clone();

    let outcome = match route.operation {
        Operation::View if is_read(&method) => state.wiki.view(route.name).await?,
        Operation::Edit if is_read(&method) => state.wiki.edit(route.name).await?,
        Operation::Save if method == Method::POST => {
            let form = match Form::<SaveForm>::from_request(request, &state).await {
                Ok(Form(form)) => form,
                // No form payload at all reads as an empty body
                Err(FormRejection::InvalidFormContentType(_)) => {
                    debug!("Save of {} without form content, storing empty body", route.name);
                    SaveForm::default()
                }
                Err(rejection) => {
                    warn!("Rejected save of {}: {}", route.name, rejection);
                    return Ok(rejection.into_response());
                }
            };
            state.wiki.save(route.name, form.body.into_bytes()).await?
        }
        _ => {
            debug!("{} not allowed on {}", method, route);
            return Ok((StatusCode::METHOD_NOT_ALLOWED, "Method not allowed").into_response());
        }
    };

    respond(&state.templates, outcome)
}

/// Handle static asset requests
pub async fn handle_static(
    State(state): State<AppState>,
    AxumPath(path): AxumPath<String>,
) -> Result<Response, WikiError> {
    let relative = path.trim_start_matches('/');
    ensure_safe_path(relative)?;
    let requested = state.static_dir.join(relative);

    let bytes = match tokio::fs::read(&requested).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(WikiError::NotFound),
        Err(e) if e.kind() == std::io::ErrorKind::IsADirectory => return Err(WikiError::NotFound),
        Err(e) => return Err(WikiError::Io(e)),
    };

    let mut resp = Response::new(Body::from(bytes));
    resp.headers_mut().insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static(content_type_for(&requested)),
    );
    Ok(resp)
}

/// Turn an operation outcome into an HTTP response
fn respond(templates: &TemplateComponent, outcome: Outcome) -> Result<Response, WikiError> {
    let rendered = match outcome {
        Outcome::View(page) => templates.render_page(TemplateId::View, &page),
        Outcome::Edit(page) => templates.render_page(TemplateId::Edit, &page),
        Outcome::Index(listing) => templates.render_index(&listing),
        Outcome::Redirect(route) => return Ok(redirect(&route.path())),
    };
    match rendered {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            error!("Render failed: {}", e);
            Err(e)
        }
    }
}

fn is_read(method: &Method) -> bool {
    method == Method::GET || method == Method::HEAD
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
