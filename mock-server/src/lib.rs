//! In-memory stand-in for a slice of the Canvas REST API.
//!
//! Serves courses and course sections under `/api/v1`, paginates list
//! endpoints with Canvas-style `Link` headers, and optionally enforces a
//! bearer token.

use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub course_code: String,
    pub workflow_state: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: u64,
    pub name: String,
    pub course_id: u64,
    pub sis_section_id: Option<String>,
    pub start_at: Option<String>,
    pub end_at: Option<String>,
}

#[derive(Debug)]
pub struct Store {
    next_id: u64,
    courses: BTreeMap<u64, Course>,
    sections: BTreeMap<u64, Section>,
}

impl Store {
    /// Two published courses, 10 and 11, and no sections.
    pub fn seeded() -> Self {
        let courses = [(10, "Biology 101", "BIO101"), (11, "Chemistry 201", "CHEM201")]
            .into_iter()
            .map(|(id, name, code)| {
                (
                    id,
                    Course {
                        id,
                        name: name.to_string(),
                        course_code: code.to_string(),
                        workflow_state: "available".to_string(),
                    },
                )
            })
            .collect();
        Self {
            next_id: 100,
            courses,
            sections: BTreeMap::new(),
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
pub struct AppState {
    db: Db,
    token: Option<Arc<str>>,
}

/// Server without authentication.
pub fn app() -> Router {
    router(None)
}

/// Server that rejects requests lacking `Authorization: Bearer <token>`.
pub fn app_with_token(token: &str) -> Router {
    router(Some(Arc::from(token)))
}

fn router(token: Option<Arc<str>>) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::seeded())),
        token,
    };
    let api = Router::new()
        .route("/courses", get(list_courses))
        .route("/courses/{course_id}", get(get_course))
        .route(
            "/courses/{course_id}/sections",
            get(list_sections).post(create_section),
        )
        .route(
            "/sections/{id}",
            get(get_section).put(edit_section).delete(delete_section),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state);
    Router::new().nest("/api/v1", api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_token(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_token(token)).await
}

/// Canvas-shaped error body.
fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "errors": [{ "message": message }] }))).into_response()
}

fn not_found() -> Response {
    error(StatusCode::NOT_FOUND, "The specified resource does not exist.")
}

async fn require_token(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if let Some(token) = &state.token {
        let expected = format!("Bearer {token}");
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        if presented != Some(expected.as_str()) {
            tracing::debug!(path = %request.uri().path(), "rejecting unauthenticated request");
            return error(StatusCode::UNAUTHORIZED, "Invalid access token.");
        }
    }
    next.run(request).await
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    page: Option<usize>,
    per_page: Option<usize>,
}

/// Slice `items` to the requested page and attach `current`, `next`,
/// `prev`, `first` and `last` links.
fn paginate<T: Serialize>(
    items: Vec<T>,
    query: &PageQuery,
    headers: &HeaderMap,
    path: &str,
) -> Response {
    let per_page = query.per_page.unwrap_or(10).clamp(1, 100);
    let page = query.page.unwrap_or(1).max(1);
    let last = items.len().div_ceil(per_page).max(1);

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let link = |n: usize, rel: &str| {
        format!("<http://{host}/api/v1/{path}?page={n}&per_page={per_page}>; rel=\"{rel}\"")
    };
    let mut links = vec![link(page, "current")];
    if page < last {
        links.push(link(page + 1, "next"));
    }
    if page > 1 {
        links.push(link(page - 1, "prev"));
    }
    links.push(link(1, "first"));
    links.push(link(last, "last"));

    let slice: Vec<T> = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    let mut response = Json(slice).into_response();
    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        response.headers_mut().insert(header::LINK, value);
    }
    response
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let store = state.db.read().await;
    let courses: Vec<Course> = store.courses.values().cloned().collect();
    paginate(courses, &query, &headers, "courses")
}

async fn get_course(State(state): State<AppState>, Path(course_id): Path<u64>) -> Response {
    let store = state.db.read().await;
    match store.courses.get(&course_id) {
        Some(course) => Json(course.clone()).into_response(),
        None => not_found(),
    }
}

async fn list_sections(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
    Query(query): Query<PageQuery>,
    headers: HeaderMap,
) -> Response {
    let store = state.db.read().await;
    if !store.courses.contains_key(&course_id) {
        return not_found();
    }
    let sections: Vec<Section> = store
        .sections
        .values()
        .filter(|s| s.course_id == course_id)
        .cloned()
        .collect();
    paginate(
        sections,
        &query,
        &headers,
        &format!("courses/{course_id}/sections"),
    )
}

type SectionForm = BTreeMap<String, String>;

fn form_value(form: &SectionForm, field: &str) -> Option<String> {
    form.get(&format!("course_section[{field}]")).cloned()
}

async fn create_section(
    State(state): State<AppState>,
    Path(course_id): Path<u64>,
    Form(form): Form<SectionForm>,
) -> Response {
    let mut store = state.db.write().await;
    if !store.courses.contains_key(&course_id) {
        return not_found();
    }
    let Some(name) = form_value(&form, "name").filter(|n| !n.trim().is_empty()) else {
        return error(StatusCode::BAD_REQUEST, "name is required");
    };
    let section = Section {
        id: store.next_id(),
        name,
        course_id,
        sis_section_id: form_value(&form, "sis_section_id"),
        start_at: form_value(&form, "start_at"),
        end_at: form_value(&form, "end_at"),
    };
    store.sections.insert(section.id, section.clone());
    Json(section).into_response()
}

async fn get_section(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let store = state.db.read().await;
    match store.sections.get(&id) {
        Some(section) => Json(section.clone()).into_response(),
        None => not_found(),
    }
}

async fn edit_section(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Form(form): Form<SectionForm>,
) -> Response {
    let mut store = state.db.write().await;
    let Some(section) = store.sections.get_mut(&id) else {
        return not_found();
    };
    if let Some(name) = form_value(&form, "name") {
        section.name = name;
    }
    if let Some(sis_section_id) = form_value(&form, "sis_section_id") {
        section.sis_section_id = Some(sis_section_id);
    }
    if let Some(start_at) = form_value(&form, "start_at") {
        section.start_at = Some(start_at);
    }
    if let Some(end_at) = form_value(&form, "end_at") {
        section.end_at = Some(end_at);
    }
    Json(section.clone()).into_response()
}

async fn delete_section(State(state): State<AppState>, Path(id): Path<u64>) -> Response {
    let mut store = state.db.write().await;
    match store.sections.remove(&id) {
        Some(section) => Json(section).into_response(),
        None => not_found(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_serializes_to_canvas_shape() {
        let section = Section {
            id: 55,
            name: "Section A".to_string(),
            course_id: 10,
            sis_section_id: None,
            start_at: None,
            end_at: None,
        };
        let json = serde_json::to_value(&section).unwrap();
        assert_eq!(json["id"], 55);
        assert_eq!(json["name"], "Section A");
        assert_eq!(json["course_id"], 10);
        assert!(json["sis_section_id"].is_null());
    }

    #[test]
    fn seeded_store_has_two_courses() {
        let store = Store::seeded();
        assert_eq!(store.courses.len(), 2);
        assert!(store.courses.contains_key(&10));
        assert!(store.sections.is_empty());
    }

    #[test]
    fn ids_are_allocated_in_sequence() {
        let mut store = Store::seeded();
        let a = store.next_id();
        let b = store.next_id();
        assert_eq!(b, a + 1);
    }

    #[test]
    fn form_value_reads_bracketed_keys() {
        let mut form = SectionForm::new();
        form.insert("course_section[name]".to_string(), "Lab".to_string());
        assert_eq!(form_value(&form, "name").as_deref(), Some("Lab"));
        assert!(form_value(&form, "end_at").is_none());
    }
}
