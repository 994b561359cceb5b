mod support;

use axum::http::{header, StatusCode};
use support::*;
use models::user::Role;
use serde_json::json;

fn page_body(slug: &str) -> serde_json::Value {
    json!({"title": "About Us", "slug": slug, "content": "<p>We build things.</p>", "status": "PUBLISHED"})
}

#[tokio::test]
async fn marketing_manager_reads_leads_but_cannot_delete_pages() {
    let (app, state) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, page) = send(&app, "POST", "/api/admin/pages", Some(&admin), Some(page_body("about"))).await;
    assert_eq!(status, StatusCode::CREATED);
    let page_id = page["id"].as_str().expect("page id").to_string();

    add_staff(&state, "marketing@eagleminds.test", Role::MarketingManager).await;
    let marketing = login(&app, "marketing@eagleminds.test", STAFF_PASSWORD).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/pages/{page_id}"), Some(&marketing), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, body) = send(&app, "GET", "/api/admin/leads", Some(&marketing), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["leads"].is_array());
    let (status, _) = send(&app, "GET", "/api/admin/pages", Some(&marketing), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", &format!("/api/admin/pages/{page_id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn contact_submission_reaches_admin_lead_list() {
    let (app, _) = test_app().await;
    let form = json!({
        "name": "John Smith",
        "email": "john.smith@client.test",
        "service": "Web Development",
        "message": "We need a new site.",
        "source": "ignored"
    });
    let (status, body) = send(&app, "POST", "/api/contact", None, Some(form)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["lead"]["status"], "NEW");
    assert_eq!(body["lead"]["source"], "website");

    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, body) = send(&app, "GET", "/api/admin/leads", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["pagination"]["total"], 1);
    assert_eq!(body["leads"][0]["email"], "john.smith@client.test");
}

#[tokio::test]
async fn intake_rejects_missing_fields() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, "POST", "/api/leads", None, Some(json!({"name": "No Email"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Name, email, service, and message are required");
}

#[tokio::test]
async fn duplicate_slug_is_rejected_and_original_kept() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (status, first) = send(&app, "POST", "/api/admin/pages", Some(&admin), Some(page_body("about"))).await;
    assert_eq!(status, StatusCode::CREATED);

    let dup = json!({"title": "Another", "slug": "about", "content": "different"});
    let (status, body) = send(&app, "POST", "/api/admin/pages", Some(&admin), Some(dup)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page with this slug already exists");

    let id = first["id"].as_str().expect("id");
    let (_, stored) = send(&app, "GET", &format!("/api/admin/pages/{id}"), Some(&admin), None).await;
    assert_eq!(stored["title"], "About Us");
    let (_, list) = send(&app, "GET", "/api/admin/pages", Some(&admin), None).await;
    assert_eq!(list["pagination"]["total"], 1);
}

#[tokio::test]
async fn page_update_and_delete_by_body_and_query() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, page) = send(&app, "POST", "/api/admin/pages", Some(&admin), Some(page_body("services-overview"))).await;
    let id = page["id"].as_str().expect("id").to_string();

    let (status, body) = send(&app, "PUT", "/api/admin/pages", Some(&admin), Some(json!({"title": "No id"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Page ID is required");

    let (status, updated) = send(&app, "PUT", "/api/admin/pages", Some(&admin), Some(json!({"id": id, "title": "Overview"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Overview");
    assert_eq!(updated["slug"], "services-overview");

    let (status, _) = send(&app, "DELETE", &format!("/api/admin/pages?id={id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/api/admin/pages/{id}"), Some(&admin), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_catalogue_lists_only_published_services() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let live = json!({
        "name": "SEO",
        "slug": "seo",
        "description": "Search optimisation",
        "features": ["Audit", "Keywords"],
        "pricing": {"amount": 499.0, "currency": "USD"},
        "status": "PUBLISHED"
    });
    let draft = json!({"name": "Branding", "slug": "branding", "description": "Identity work"});
    assert_eq!(send(&app, "POST", "/api/admin/services", Some(&admin), Some(live)).await.0, StatusCode::CREATED);
    assert_eq!(send(&app, "POST", "/api/admin/services", Some(&admin), Some(draft)).await.0, StatusCode::CREATED);

    let (status, body) = send(&app, "GET", "/api/services", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let services = body["services"].as_array().expect("services");
    assert_eq!(services.len(), 1);
    assert_eq!(services[0]["slug"], "seo");
    assert_eq!(services[0]["features"], json!(["Audit", "Keywords"]));

    let (_, admin_list) = send(&app, "GET", "/api/admin/services?status=ALL", Some(&admin), None).await;
    assert_eq!(admin_list["pagination"]["total"], 2);
    let (_, drafts) = send(&app, "GET", "/api/admin/services?status=DRAFT", Some(&admin), None).await;
    assert_eq!(drafts["pagination"]["total"], 1);
}

#[tokio::test]
async fn lead_patch_assigns_and_moves_status() {
    let (app, _) = test_app().await;
    let form = json!({"name": "Lee", "email": "lee@client.test", "service": "SEO", "message": "Hello"});
    let (_, created) = send(&app, "POST", "/api/leads", None, Some(form)).await;
    let lead_id = created["lead"]["id"].as_str().expect("lead id").to_string();

    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&admin), None).await;
    let admin_id = me["user"]["id"].clone();

    let patch = json!({"leadId": lead_id, "status": "CONTACTED", "assignedTo": admin_id});
    let (status, body) = send(&app, "PATCH", "/api/admin/leads", Some(&admin), Some(patch)).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "CONTACTED");
    assert_eq!(body["assignee"]["email"], ADMIN_EMAIL);

    let (status, body) = send(&app, "PATCH", &format!("/api/admin/leads/{lead_id}"), Some(&admin), Some(json!({"assignedTo": null}))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["assignedTo"].is_null());
    assert_eq!(body["status"], "CONTACTED");

    let (status, _) = send(&app, "PATCH", "/api/admin/leads", Some(&admin), Some(json!({"status": "CLOSED"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_counts_content_and_leads() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    send(&app, "POST", "/api/admin/pages", Some(&admin), Some(page_body("about"))).await;
    let form = json!({"name": "Ann", "email": "ann@client.test", "service": "SEO", "message": "Hi"});
    send(&app, "POST", "/api/contact", None, Some(form)).await;

    let (status, body) = send(&app, "GET", "/api/admin/dashboard", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    let stats = &body["stats"];
    assert_eq!(stats["totalPages"], 1);
    assert_eq!(stats["totalLeads"], 1);
    assert_eq!(stats["newLeads"], 1);
    assert_eq!(stats["recentLeads"], 1);
    assert_eq!(stats["conversionRate"], 0);
}

#[tokio::test]
async fn admin_manages_users() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let new_user = json!({"email": "Editor@EagleMinds.test", "name": "Editor", "password": "editor-pass-1", "role": "CONTENT_MANAGER"});
    let (status, created) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(new_user.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["email"], "editor@eagleminds.test");
    assert_eq!(created["role"], "CONTENT_MANAGER");

    let (status, _) = send(&app, "POST", "/api/admin/users", Some(&admin), Some(new_user)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = created["id"].as_str().expect("id");
    let (status, updated) = send(&app, "PATCH", &format!("/api/admin/users/{id}"), Some(&admin), Some(json!({"password": "rotated-pass-2"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Editor");
    login(&app, "editor@eagleminds.test", "rotated-pass-2").await;

    let (_, list) = send(&app, "GET", "/api/admin/users", Some(&admin), None).await;
    assert_eq!(list["users"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn settings_sections_are_validated_and_redacted() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let (status, body) = send(&app, "PUT", "/api/admin/settings/email", Some(&admin), Some(json!({"smtpHost": "smtp.mail.test", "smtpPassword": "hunter22"}))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"]["smtpHost"], "smtp.mail.test");
    assert_eq!(body["email"]["smtpPasswordSet"], true);
    assert!(!body.to_string().contains("hunter22"));

    let (status, body) = send(&app, "PUT", "/api/admin/settings/billing", Some(&admin), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown settings section: billing");

    let (status, _) = send(&app, "PUT", "/api/admin/settings/site", Some(&admin), Some(json!({"bogusField": 1}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, "GET", "/api/admin/settings", Some(&admin), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"]["smtpPasswordSet"], true);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/admin/leads"].is_object());
}

#[tokio::test]
async fn malformed_path_id_gets_json_error() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    for uri in ["/api/admin/pages/not-a-uuid", "/api/admin/services/123", "/api/admin/leads/abc"] {
        let (status, headers, body) = send_raw(&app, "GET", uri, Some(&admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        let content_type = headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or_default();
        assert!(content_type.starts_with("application/json"), "{uri}: {content_type}");
        assert!(body["error"].is_string(), "{uri}: {body}");
    }
    let (status, body) = send(&app, "PATCH", "/api/admin/users/nope", Some(&admin), Some(json!({"name": "X"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn settings_read_can_be_saved_back() {
    let (app, _) = test_app().await;
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    send(&app, "PUT", "/api/admin/settings/email", Some(&admin), Some(json!({"smtpPassword": "hunter22"}))).await;

    let (_, all) = send(&app, "GET", "/api/admin/settings", Some(&admin), None).await;
    let (status, body) = send(&app, "PUT", "/api/admin/settings/email", Some(&admin), Some(all["email"].clone())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["email"]["smtpPasswordSet"], true);
    assert_eq!(body["email"], all["email"]);
}
