mod common;

use axum::body::Body;
use axum::extract::ConnectInfo;
use axum::http::{Request, StatusCode};
use common::{
    ADMIN_PASSWORD, body_text, cookie_pair, follow_with_flash, get, location, login, post_form,
    send, set_cookie, spawn_app, spawn_app_with,
};
use std::net::SocketAddr;

fn login_from(peer: [u8; 4], password: &str) -> Request<Body> {
    let body = format!("email=admin%40example.com&password={password}");
    let mut req = post_form("/auth", &body, None);
    req.extensions_mut()
        .insert(ConnectInfo(SocketAddr::from((peer, 40_000))));
    req
}

#[tokio::test]
async fn anonymous_requests_are_sent_to_login() {
    let t = spawn_app().await;

    for path in ["/", "/projects", "/skills", "/experience/new"] {
        let resp = send(&t.app, get(path, None)).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&resp), Some("/auth"), "{path}");
    }

    // Health checks bypass the session gate.
    let resp = send(&t.app, get("/healthz", None)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = send(&t.app, get("/auth", None)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-frame-options").and_then(|v| v.to_str().ok()),
        Some("DENY")
    );
    assert!(resp.headers().contains_key("x-request-id"));
    let body = body_text(resp).await;
    assert!(body.contains("Portfolio Dashboard"));
    assert!(body.contains(r#"name="password""#));
}

#[tokio::test]
async fn login_stores_an_http_only_session_cookie() {
    let t = spawn_app().await;

    let body = format!("email=admin%40example.com&password={ADMIN_PASSWORD}");
    let resp = send(&t.app, post_form("/auth", &body, None)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));

    let line = set_cookie(&resp, "token").expect("token cookie");
    assert!(line.contains("HttpOnly"));
    assert!(line.contains("SameSite=Lax"));
    assert!(line.contains("Max-Age=604800"));
    // The cookie is encrypted, never the raw access token.
    assert!(!line.contains("tok-1"));

    let session = cookie_pair(&resp, "token").expect("token pair");
    let page = follow_with_flash(&t.app, resp, &session).await;
    assert!(page.contains("Logged in successfully"));
    assert!(page.contains(r#"href="/projects""#));
}

#[tokio::test]
async fn bad_credentials_keep_the_user_on_the_login_page() {
    let t = spawn_app().await;

    let resp = send(
        &t.app,
        post_form("/auth", "email=admin%40example.com&password=wrong-pass", None),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(set_cookie(&resp, "token").is_none());
    let body = body_text(resp).await;
    assert!(body.contains("Invalid credentials"));
    assert!(body.contains("admin@example.com"));

    let resp = send(&t.app, post_form("/auth", "email=admin&password=123", None)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(resp).await;
    assert!(body.contains("Invalid email address"));
    assert!(body.contains("Password must be at least 6 characters"));

    // Validation failures never reach the API.
    assert_eq!(t.api.calls(), ["POST /auth"]);
}

#[tokio::test]
async fn signed_in_users_skip_the_login_page() {
    let t = spawn_app().await;
    let session = login(&t.app).await;

    let resp = send(&t.app, get("/auth", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));

    let resp = send(&t.app, get("/", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert!(body.contains("Manage your portfolio projects"));
    assert!(body.contains(r#"action="/logout""#));
}

#[tokio::test]
async fn logout_clears_the_session() {
    let t = spawn_app().await;
    let session = login(&t.app).await;

    let resp = send(&t.app, post_form("/logout", "", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth"));
    let removal = set_cookie(&resp, "token").expect("removal cookie");
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn rejected_tokens_sign_the_user_out() {
    let t = spawn_app().await;
    t.api.seed_projects(1);
    let session = login(&t.app).await;

    t.api.revoke();
    let resp = send(&t.app, get("/projects", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/auth"));
    let removal = set_cookie(&resp, "token").expect("removal cookie");
    assert!(removal.contains("Max-Age=0"));
}

#[tokio::test]
async fn unknown_pages_render_not_found() {
    let t = spawn_app().await;
    let session = login(&t.app).await;

    let resp = send(&t.app, get("/nowhere", Some(&session))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_attempts_are_throttled_per_peer() {
    let t = spawn_app_with(|cfg| cfg.basic.login_per_minute = 2).await;
    let noisy = [203, 0, 113, 7];

    for _ in 0..2 {
        let resp = send(&t.app, login_from(noisy, "wrong-password")).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
    let resp = send(&t.app, login_from(noisy, ADMIN_PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(body_text(resp).await.contains("Too many login attempts"));
    assert_eq!(t.api.calls().iter().filter(|c| *c == "POST /auth").count(), 2);

    let resp = send(&t.app, login_from([198, 51, 100, 1], ADMIN_PASSWORD)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), Some("/"));
}
