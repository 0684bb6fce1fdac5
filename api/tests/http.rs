//! End-to-end tests over the HTTP router

use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::TestServer;
use quickdesk_api::{build_router, ApiConfig, ApiState};
use serde_json::{json, Value};

async fn server_with(config: ApiConfig) -> TestServer {
    let state = ApiState::in_memory(config);
    state.categories.seed_defaults().await.unwrap();
    TestServer::new(build_router(state)).unwrap()
}

async fn server() -> TestServer {
    server_with(ApiConfig::default()).await
}

fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
}

/// Register an account and return its token and user id.
async fn register(server: &TestServer, username: &str, role: &str, tags: &[&str]) -> (String, String) {
    let response = server
        .post("/api/register")
        .json(&json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "password": "pw-123456",
            "role": role,
            "specializations": tags,
            "admin_key": "ADMIN2024",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    (
        body["data"]["token"].as_str().unwrap().to_string(),
        body["data"]["user"]["id"].as_str().unwrap().to_string(),
    )
}

async fn create_ticket(server: &TestServer, token: &str, subject: &str, description: &str, category: i64) -> Value {
    let response = server
        .post("/api/tickets")
        .add_header(AUTHORIZATION, bearer(token))
        .json(&json!({ "subject": subject, "description": description, "category_id": category }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

async fn notifications(server: &TestServer, token: &str) -> Vec<Value> {
    let body: Value = server
        .get("/api/notifications")
        .add_header(AUTHORIZATION, bearer(token))
        .await
        .json();
    body["data"].as_array().unwrap().clone()
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let server = server().await;
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["status"], "ok");
}

#[tokio::test]
async fn test_register_and_login() {
    let server = server().await;
    let (_, user_id) = register(&server, "bob", "user", &[]).await;

    let response = server
        .post("/api/login")
        .json(&json!({ "email": "bob@example.com", "password": "pw-123456" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["id"], user_id.as_str());
    assert!(body["data"]["user"].get("password_hash").is_none());

    let wrong = server
        .post("/api/login")
        .json(&json!({ "email": "bob@example.com", "password": "nope" }))
        .await;
    assert_eq!(wrong.status_code(), StatusCode::UNAUTHORIZED);

    let missing = server.post("/api/login").json(&json!({ "email": "bob@example.com" })).await;
    assert_eq!(missing.status_code(), StatusCode::BAD_REQUEST);

    let duplicate = server
        .post("/api/register")
        .json(&json!({ "username": "bob2", "email": "bob@example.com", "password": "x" }))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(duplicate.json::<Value>()["error"]["code"], "USER_EXISTS");
}

#[tokio::test]
async fn test_admin_registration_requires_key() {
    let server = server().await;
    let response = server
        .post("/api/register")
        .json(&json!({
            "username": "mallory",
            "email": "mallory@example.com",
            "password": "pw",
            "role": "admin",
            "admin_key": "guess",
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    register(&server, "root", "admin", &[]).await;
}

#[tokio::test]
async fn test_token_required() {
    let server = server().await;
    assert_eq!(server.get("/api/tickets").await.status_code(), StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/tickets")
        .add_header(AUTHORIZATION, bearer("not-a-jwt"))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_ticket_routed_to_best_agent() {
    let server = server().await;
    let (ana_token, ana_id) = register(&server, "ana", "agent", &["printer", "hardware"]).await;
    let (raj_token, _) = register(&server, "raj", "agent", &["network"]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;

    let created = create_ticket(&server, &user_token, "Printer", "My printer is jammed", 1).await;
    assert_eq!(created["ticket"]["assigned_to"], ana_id.as_str());
    assert_eq!(created["ticket"]["assigned_agent_name"], "ana");
    assert_eq!(created["ticket"]["status"], "open");

    let providers = created["best_providers"].as_array().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0]["name"], "ana");
    // printer in the description, printer and hardware against the category tags
    assert_eq!(providers[0]["score"], 4.0);

    let for_user = notifications(&server, &user_token).await;
    assert_eq!(for_user.len(), 1);
    assert_eq!(for_user[0]["kind"], "best_providers");

    let for_ana = notifications(&server, &ana_token).await;
    assert_eq!(for_ana[0]["kind"], "ticket_assigned");
    assert!(notifications(&server, &raj_token).await.is_empty());
}

#[tokio::test]
async fn test_unmatched_ticket_stays_unassigned() {
    let server = server().await;
    register(&server, "ana", "agent", &["printer"]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;

    let created = create_ticket(&server, &user_token, "Hi", "Something odd happened", 5).await;
    assert!(created["ticket"]["assigned_to"].is_null());
    assert!(created["best_providers"].as_array().unwrap().is_empty());
    assert!(notifications(&server, &user_token).await.is_empty());
}

#[tokio::test]
async fn test_rating_feeds_matching() {
    let server = server().await;
    let (_, ana_id) = register(&server, "ana", "agent", &["printer"]).await;
    let (_, raj_id) = register(&server, "raj", "agent", &[]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;

    for rating in [5.0, 1.0] {
        let response = server
            .post(&format!("/api/agents/{raj_id}/rate"))
            .add_header(AUTHORIZATION, bearer(&user_token))
            .json(&json!({ "rating": rating }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK);
    }
    let profile: Value = server
        .get(&format!("/api/agents/{raj_id}/profile"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .json();
    assert_eq!(profile["data"]["profile"]["rating"], 3.0);
    assert_eq!(profile["data"]["profile"]["total_ratings"], 2);

    let invalid = server
        .post(&format!("/api/agents/{raj_id}/rate"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "rating": 6 }))
        .await;
    assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);

    let not_agent = server
        .get(&format!("/api/agents/{}/profile", uuid::Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(not_agent.status_code(), StatusCode::NOT_FOUND);

    // raj has no tags but a rating of 3 scores 1.5; ana's description match scores 2
    let created = create_ticket(&server, &user_token, "Printer", "printer offline", 2).await;
    let providers = created["best_providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["id"], ana_id.as_str());
    assert_eq!(providers[1]["id"], raj_id.as_str());
    assert_eq!(providers[1]["score"], 1.5);
}

#[tokio::test]
async fn test_chat_flow_and_access() {
    let server = server().await;
    let (ana_token, _) = register(&server, "ana", "agent", &["wifi"]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;
    let (eve_token, _) = register(&server, "eve", "user", &[]).await;

    let created = create_ticket(&server, &user_token, "WiFi", "wifi keeps dropping", 3).await;
    let ticket_id = created["ticket"]["id"].as_str().unwrap().to_string();

    let empty = server
        .post(&format!("/api/chat/{ticket_id}/message"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "content": "   " }))
        .await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);

    let posted = server
        .post(&format!("/api/chat/{ticket_id}/message"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "content": " still down " }))
        .await;
    assert_eq!(posted.status_code(), StatusCode::CREATED);
    assert_eq!(posted.json::<Value>()["data"]["content"], "still down");

    let view: Value = server
        .get(&format!("/api/chat/{ticket_id}"))
        .add_header(AUTHORIZATION, bearer(&ana_token))
        .await
        .json();
    assert_eq!(view["data"]["ticket"]["status"], "in-progress");
    assert_eq!(view["data"]["agent"], "ana");
    assert_eq!(view["data"]["chat"].as_array().unwrap().len(), 1);

    let denied = server
        .get(&format!("/api/chat/{ticket_id}"))
        .add_header(AUTHORIZATION, bearer(&eve_token))
        .await;
    assert_eq!(denied.status_code(), StatusCode::FORBIDDEN);

    let kinds: Vec<Value> = notifications(&server, &ana_token).await.into_iter().map(|n| n["kind"].clone()).collect();
    assert!(kinds.contains(&json!("user_response")));
}

#[tokio::test]
async fn test_admin_only_endpoints() {
    let server = server().await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;
    let (admin_token, _) = register(&server, "root", "admin", &[]).await;

    let forbidden = server
        .post("/api/categories")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "name": "Billing" }))
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let created = server
        .post("/api/categories")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "name": "Billing" }))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);
    assert!(created.json::<Value>()["data"]["specializations"].as_array().unwrap().is_empty());

    let categories: Value = server
        .get("/api/categories")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .json();
    assert_eq!(categories["data"].as_array().unwrap().len(), 6);

    let users = server.get("/api/users").add_header(AUTHORIZATION, bearer(&user_token)).await;
    assert_eq!(users.status_code(), StatusCode::FORBIDDEN);
    let users: Value = server.get("/api/users").add_header(AUTHORIZATION, bearer(&admin_token)).await.json();
    assert_eq!(users["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_listing_search_and_pages() {
    let server = server().await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;
    let (other_token, _) = register(&server, "eve", "user", &[]).await;

    for i in 0..11 {
        create_ticket(&server, &user_token, &format!("Ticket {i}"), "laptop screen flickers", 1).await;
    }
    create_ticket(&server, &other_token, "VPN", "Cannot reach VPN", 3).await;

    let page: Value = server
        .get("/api/tickets")
        .add_query_param("page", 2)
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .json();
    assert_eq!(page["data"]["total_tickets"], 12);
    assert_eq!(page["data"]["total_pages"], 2);
    assert_eq!(page["data"]["tickets"].as_array().unwrap().len(), 2);

    let search: Value = server
        .get("/api/tickets")
        .add_query_param("search", "vpn")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .json();
    assert_eq!(search["data"]["total_tickets"], 1);

    let mine: Value = server
        .get("/api/tickets/my")
        .add_header(AUTHORIZATION, bearer(&other_token))
        .await
        .json();
    assert_eq!(mine["data"]["total_tickets"], 1);

    let stats: Value = server.get("/api/stats").add_header(AUTHORIZATION, bearer(&user_token)).await.json();
    assert_eq!(stats["data"]["total_tickets"], 11);
    assert_eq!(stats["data"]["open_tickets"], 11);
}

#[tokio::test]
async fn test_ticket_updates_comments_votes() {
    let server = server().await;
    let (_, ana_id) = register(&server, "ana", "agent", &[]).await;
    let (user_token, user_id) = register(&server, "bob", "user", &[]).await;
    let created = create_ticket(&server, &user_token, "Login", "cannot sign in", 4).await;
    let id = created["ticket"]["id"].as_str().unwrap().to_string();

    let updated = server
        .put(&format!("/api/tickets/{id}"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "status": "resolved", "assigned_to": ana_id }))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let ticket = updated.json::<Value>()["data"].clone();
    assert_eq!(ticket["status"], "resolved");
    assert_eq!(ticket["assigned_to"], ana_id.as_str());

    let not_agent = server
        .put(&format!("/api/tickets/{id}"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "assigned_to": user_id }))
        .await;
    assert_eq!(not_agent.status_code(), StatusCode::NOT_FOUND);

    let comment = server
        .post(&format!("/api/tickets/{id}/comments"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .json(&json!({ "content": "thanks" }))
        .await;
    assert_eq!(comment.status_code(), StatusCode::CREATED);

    for vote in ["up", "up", "down"] {
        server
            .post(&format!("/api/tickets/{id}/vote"))
            .add_header(AUTHORIZATION, bearer(&user_token))
            .json(&json!({ "vote": vote }))
            .await;
    }
    let ticket: Value = server
        .get(&format!("/api/tickets/{id}"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await
        .json();
    assert_eq!(ticket["data"]["upvotes"], 2);
    assert_eq!(ticket["data"]["downvotes"], 1);
    assert_eq!(ticket["data"]["comments"].as_array().unwrap().len(), 1);

    let missing = server
        .get(&format!("/api/tickets/{}", uuid::Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_multipart_ticket_with_attachment() {
    let uploads = tempfile::tempdir().unwrap();
    let config = ApiConfig { upload_dir: uploads.path().to_path_buf(), ..ApiConfig::default() };
    let server = server_with(config).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;

    let boundary = "quickdesk-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"subject\"\r\n\r\nScreen\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"description\"\r\n\r\nCracked screen\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"category_id\"\r\n\r\n1\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"attachment\"; filename=\"photo.txt\"\r\n\
         Content-Type: text/plain\r\n\r\nfake image\r\n\
         --{b}--\r\n",
        b = boundary
    );

    let response = server
        .post("/api/tickets")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .content_type(&format!("multipart/form-data; boundary={boundary}"))
        .bytes(body.into_bytes().into())
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let ticket = response.json::<Value>()["data"]["ticket"].clone();
    let stored = ticket["attachment"].as_str().unwrap();
    assert!(stored.ends_with("-photo.txt"));
    assert_eq!(std::fs::read_to_string(uploads.path().join(stored)).unwrap(), "fake image");
}

#[tokio::test]
async fn test_notification_mark_read() {
    let server = server().await;
    register(&server, "ana", "agent", &["printer"]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;
    create_ticket(&server, &user_token, "Printer", "printer jam", 1).await;

    let list = notifications(&server, &user_token).await;
    let id = list[0]["id"].as_str().unwrap();
    assert_eq!(list[0]["read"], false);

    let response = server
        .put(&format!("/api/notifications/{id}/read"))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(notifications(&server, &user_token).await[0]["read"], true);

    let unknown = server
        .put(&format!("/api/notifications/{}/read", uuid::Uuid::new_v4()))
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_input_gets_error_envelope() {
    let server = server().await;
    let (_, agent_id) = register(&server, "ana", "agent", &[]).await;
    let (user_token, _) = register(&server, "bob", "user", &[]).await;

    for body in [json!({}), json!({ "rating": "five" }), json!({ "rating": null })] {
        let response = server
            .post(&format!("/api/agents/{agent_id}/rate"))
            .add_header(AUTHORIZATION, bearer(&user_token))
            .json(&body)
            .await;
        assert_eq!(response.status_code(), StatusCode::BAD_REQUEST, "{body}");
        let envelope: Value = response.json();
        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["error"]["code"], "BAD_REQUEST");
    }

    let bad_id = server
        .get("/api/agents/not-a-uuid/profile")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(bad_id.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_id.json::<Value>()["success"], false);

    let bad_page = server
        .get("/api/tickets?page=first")
        .add_header(AUTHORIZATION, bearer(&user_token))
        .await;
    assert_eq!(bad_page.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(bad_page.json::<Value>()["error"]["code"], "BAD_REQUEST");
}
