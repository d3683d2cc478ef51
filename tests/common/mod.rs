#![allow(dead_code)]

use axum::{
    Json, Router,
    body::{Body, to_bytes},
    extract::{Path, State},
    http::{HeaderMap, Method, Request, Response, StatusCode, header},
    routing::{get as route_get, post as route_post},
};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "secret123";
pub const ACCESS_TOKEN: &str = "tok-1";

#[derive(Debug, Default)]
pub struct MockData {
    pub projects: Vec<Value>,
    pub blogs: Vec<Value>,
    pub experience: Vec<Value>,
    pub skills: Vec<String>,
    /// Once set every authorized call answers 401, as if the token was revoked.
    pub revoked: bool,
    /// Once set record writes answer 500 without a message.
    pub failing_writes: bool,
    /// Hits on `/flaky`, which answers 502 to the first one only.
    pub flaky_hits: usize,
    /// `METHOD path` of each call, in arrival order.
    pub calls: Vec<String>,
}

impl MockData {
    fn records(&mut self, resource: &str) -> Option<&mut Vec<Value>> {
        match resource {
            "project" => Some(&mut self.projects),
            "blog" => Some(&mut self.blogs),
            "experiance" => Some(&mut self.experience),
            _ => None,
        }
    }
}

/// Display name and id prefix of a mock collection.
fn resource_label(resource: &str) -> (&'static str, char) {
    match resource {
        "project" => ("Project", 'p'),
        "blog" => ("Blog", 'b'),
        _ => ("Experience", 'e'),
    }
}

/// In-process stand-in for the portfolio REST API.
#[derive(Clone, Default)]
pub struct MockApi {
    data: Arc<Mutex<MockData>>,
}

impl MockApi {
    pub fn with<R>(&self, f: impl FnOnce(&mut MockData) -> R) -> R {
        let mut data = self.data.lock().expect("mock data poisoned");
        f(&mut data)
    }

    pub fn seed_projects(&self, n: usize) {
        self.with(|d| {
            d.projects = (1..=n)
                .map(|i| {
                    json!({
                        "_id": format!("p{i:02}"),
                        "title": format!("Project {i:02}"),
                        "images": [format!("https://img.example.com/{i}.png")],
                        "technologies": ["Rust"],
                        "priority": "medium",
                    })
                })
                .collect();
        });
    }

    pub fn seed_blogs(&self, n: usize) {
        self.with(|d| {
            d.blogs = (1..=n)
                .map(|i| {
                    json!({
                        "_id": format!("b{i:02}"),
                        "title": format!("Post {i:02}"),
                        "content": "A long enough body of text.",
                        "tags": ["rust", "web"],
                        "image": format!("https://img.example.com/post-{i}.png"),
                        "createdAt": "2024-03-01T10:00:00Z",
                    })
                })
                .collect();
        });
    }

    pub fn seed_experience(&self, n: usize) {
        self.with(|d| {
            d.experience = (1..=n)
                .map(|i| {
                    json!({
                        "_id": format!("e{i:02}"),
                        "title": format!("Engineer {i:02}"),
                        "company": format!("Company {i:02}"),
                        "location": "Berlin",
                        "period": "2020 - 2022",
                        "technologies": ["Rust"],
                        "description": ["Built things"],
                    })
                })
                .collect();
        });
    }

    pub fn seed_skills(&self, skills: &[&str]) {
        self.with(|d| d.skills = skills.iter().map(ToString::to_string).collect());
    }

    pub fn revoke(&self) {
        self.with(|d| d.revoked = true);
    }

    pub fn fail_writes(&self) {
        self.with(|d| d.failing_writes = true);
    }

    pub fn project_titles(&self) -> Vec<String> {
        self.with(|d| titles(&d.projects))
    }

    pub fn blog_titles(&self) -> Vec<String> {
        self.with(|d| titles(&d.blogs))
    }

    pub fn experience_titles(&self) -> Vec<String> {
        self.with(|d| titles(&d.experience))
    }

    pub fn skills(&self) -> Vec<String> {
        self.with(|d| d.skills.clone())
    }

    pub fn calls(&self) -> Vec<String> {
        self.with(|d| d.calls.clone())
    }

    fn record(&self, call: String) {
        self.with(|d| d.calls.push(call));
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let bearer = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        bearer == Some(ACCESS_TOKEN) && !self.with(|d| d.revoked)
    }
}

fn titles(records: &[Value]) -> Vec<String> {
    records
        .iter()
        .filter_map(|r| r["title"].as_str().map(str::to_string))
        .collect()
}

type Reply = (StatusCode, Json<Value>);

fn unauthorized() -> Reply {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "success": false, "message": "Unauthorized" })),
    )
}

fn not_found(message: &str) -> Reply {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "message": message })),
    )
}

fn ok(message: &str, data: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "message": message, "data": data })),
    )
}

async fn auth(State(api): State<MockApi>, Json(body): Json<Value>) -> Reply {
    api.record("POST /auth".to_string());
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        ok("Login successful", json!({ "accessToken": ACCESS_TOKEN }))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "message": "Invalid email or password" })),
        )
    }
}

async fn list_records(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(resource): Path<String>,
) -> Reply {
    api.record(format!("GET /{resource}"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    match api.with(|d| d.records(&resource).cloned()) {
        Some(records) => ok("", Value::Array(records)),
        None => not_found("Route not found"),
    }
}

async fn create_record(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path(resource): Path<String>,
    Json(mut body): Json<Value>,
) -> Reply {
    api.record(format!("POST /{resource}"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    if api.with(|d| d.failing_writes) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })));
    }
    let (label, prefix) = resource_label(&resource);
    let created = api.with(|d| {
        let records = d.records(&resource)?;
        body["_id"] = json!(format!("{prefix}{:02}", records.len() + 1));
        records.push(body);
        Some(())
    });
    match created {
        Some(()) => ok(&format!("{label} created"), Value::Null),
        None => not_found("Route not found"),
    }
}

async fn get_record(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
) -> Reply {
    api.record(format!("GET /{resource}/{id}"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    let found = api.with(|d| {
        d.records(&resource)
            .and_then(|r| r.iter().find(|v| v["_id"] == id.as_str()).cloned())
    });
    match found {
        Some(record) => ok("", record),
        None => not_found(&format!("{} not found", resource_label(&resource).0)),
    }
}

async fn update_record(
    State(api): State<MockApi>,
    method: Method,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
    Json(mut body): Json<Value>,
) -> Reply {
    api.record(format!("{method} /{resource}/{id}"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    if api.with(|d| d.failing_writes) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "success": false })));
    }
    let updated = api.with(|d| {
        let slot = d
            .records(&resource)?
            .iter_mut()
            .find(|v| v["_id"] == id.as_str())?;
        body["_id"] = json!(id);
        *slot = body;
        Some(())
    });
    let label = resource_label(&resource).0;
    match updated {
        Some(()) => ok(&format!("{label} updated"), Value::Null),
        None => not_found(&format!("{label} not found")),
    }
}

async fn delete_record(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Path((resource, id)): Path<(String, String)>,
) -> Reply {
    api.record(format!("DELETE /{resource}/{id}"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    api.with(|d| {
        if let Some(records) = d.records(&resource) {
            records.retain(|v| v["_id"] != id.as_str());
        }
    });
    ok("", Value::Null)
}

async fn get_skills(State(api): State<MockApi>, headers: HeaderMap) -> Reply {
    api.record("GET /skills".to_string());
    if !api.authorized(&headers) {
        return unauthorized();
    }
    ok("", json!({ "skills": api.skills() }))
}

async fn replace_skills(
    State(api): State<MockApi>,
    method: Method,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    api.record(format!("{method} /skills"));
    if !api.authorized(&headers) {
        return unauthorized();
    }
    let skills: Vec<String> = serde_json::from_value(body["skills"].clone()).unwrap_or_default();
    api.with(|d| d.skills = skills);
    ok("", Value::Null)
}

/// 502 on the first hit, success afterwards.
async fn flaky(State(api): State<MockApi>, method: Method) -> Reply {
    api.record(format!("{method} /flaky"));
    let hits = api.with(|d| {
        d.flaky_hits += 1;
        d.flaky_hits
    });
    if hits == 1 {
        return (
            StatusCode::BAD_GATEWAY,
            Json(json!({ "success": false, "message": "Upstream hiccup" })),
        );
    }
    ok("", json!({ "hits": hits }))
}

/// 2xx status with an envelope that reports failure.
async fn rejected(State(api): State<MockApi>, method: Method) -> Reply {
    api.record(format!("{method} /rejected"));
    (
        StatusCode::OK,
        Json(json!({ "success": false, "message": "Title already taken" })),
    )
}

async fn no_content(State(api): State<MockApi>, method: Method) -> StatusCode {
    api.record(format!("{method} /empty"));
    StatusCode::OK
}

/// Starts the mock API on an ephemeral port and returns its `/api` base URL.
pub async fn spawn_mock_api(api: MockApi) -> String {
    let app = Router::new()
        .route("/api/auth", route_post(auth))
        .route(
            "/api/skills",
            route_get(get_skills)
                .patch(replace_skills)
                .put(replace_skills)
                .delete(replace_skills),
        )
        .route("/api/flaky", route_get(flaky).post(flaky))
        .route("/api/rejected", route_get(rejected).post(rejected))
        .route("/api/empty", route_get(no_content).delete(no_content))
        .route("/api/{resource}", route_get(list_records).post(create_record))
        .route(
            "/api/{resource}/{id}",
            route_get(get_record)
                .put(update_record)
                .patch(update_record)
                .delete(delete_record),
        )
        .with_state(api);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind mock api");
    let addr = listener.local_addr().expect("mock api has no address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock api crashed");
    });
    format!("http://{addr}/api")
}

/// Config pointing at `base_url` with retries off and test cookie settings.
pub fn test_config(base_url: &str) -> folio::config::Config {
    let mut cfg = folio::config::Config::default();
    cfg.api.base_url = url::Url::parse(base_url).expect("valid mock url");
    cfg.api.retry_max_times = 0;
    cfg.basic.cookie_secret = "k".repeat(64);
    cfg.basic.insecure_cookie = true;
    cfg
}

pub struct TestApp {
    pub app: Router,
    pub api: MockApi,
}

/// Dashboard wired to a fresh mock API.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Like [`spawn_app`], with a chance to adjust the config first.
pub async fn spawn_app_with(configure: impl FnOnce(&mut folio::config::Config)) -> TestApp {
    let api = MockApi::default();
    let base_url = spawn_mock_api(api.clone()).await;

    let mut cfg = test_config(&base_url);
    configure(&mut cfg);

    let state = folio::server::FolioState::new(&cfg).expect("failed to build state");
    TestApp {
        app: folio::server::folio_router(state),
        api,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).expect("failed to build request")
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.expect("request failed")
}

pub async fn body_text(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

/// Full `Set-Cookie` line for `name`.
pub fn set_cookie<'a>(resp: &'a Response<Body>, name: &str) -> Option<&'a str> {
    let prefix = format!("{name}=");
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
}

/// `name=value` pair of a `Set-Cookie` line, ready for a `Cookie` header.
pub fn cookie_pair(resp: &Response<Body>, name: &str) -> Option<String> {
    set_cookie(resp, name).and_then(|line| line.split(';').next().map(str::to_string))
}

/// Signs in through the login form and returns the session cookie.
pub async fn login(app: &Router) -> String {
    let body = format!("email=admin%40example.com&password={ADMIN_PASSWORD}");
    let resp = send(app, post_form("/auth", &body, None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    cookie_pair(&resp, "token").expect("login did not set the token cookie")
}

/// Follows a redirect that left a toast behind and returns the rendered page.
pub async fn follow_with_flash(app: &Router, resp: Response<Body>, session: &str) -> String {
    let to = location(&resp).expect("missing redirect").to_string();
    let flash = cookie_pair(&resp, "flash").expect("missing flash cookie");
    let cookie = format!("{session}; {flash}");
    let page = send(app, get(&to, Some(&cookie))).await;
    assert_eq!(page.status(), StatusCode::OK);
    body_text(page).await
}
