//! Drives a real listener with a cookie-keeping client, the way the admin UI does.

mod support;

use support::*;
use serde_json::{json, Value};

async fn spawn_server() -> String {
    let (app, _) = test_app().await;
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn cookie_session_survives_across_requests() -> anyhow::Result<()> {
    let base = spawn_server().await;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let resp = client.get(format!("{base}/api/auth/me")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);

    let resp = client
        .post(format!("{base}/api/auth/login"))
        .json(&json!({"email": ADMIN_EMAIL, "password": ADMIN_PASSWORD}))
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);

    // No Authorization header from here on; the cookie carries the session.
    let resp = client.get(format!("{base}/api/admin/dashboard")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await?;
    assert_eq!(body["stats"]["totalLeads"], 0);

    let resp = client.post(format!("{base}/api/auth/logout")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let resp = client.get(format!("{base}/api/auth/me")).send().await?;
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn malformed_json_gets_error_shape() -> anyhow::Result<()> {
    let base = spawn_server().await;
    let client = reqwest::Client::new();
    let resp = client
        .post(format!("{base}/api/contact"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await?;
    assert!(body["error"].is_string());
    Ok(())
}
