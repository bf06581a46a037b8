// crates/backend-lib/tests/auth_flow.rs
//! End-to-end auth scenarios against the real router.
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use mentoretalk_backend_lib::{
    config::Settings,
    models::MentorProfile,
    router::create_router,
    store::{FlatFileStore, Store},
    AppState,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    app: Router,
    state: Arc<AppState<FlatFileStore>>,
    // Held so the data directory outlives the test.
    _data_dir: tempfile::TempDir,
}

fn test_app() -> TestApp {
    let data_dir = tempfile::tempdir().unwrap();
    let settings = Settings {
        data_dir: data_dir.path().to_path_buf(),
        jwt_secret: "integration-test-secret".to_string(),
        ..Settings::default()
    };
    let store = FlatFileStore::new(data_dir.path()).unwrap();
    let state = Arc::new(AppState::new(store, settings));
    TestApp {
        app: create_router(state.clone()),
        state,
        _data_dir: data_dir,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn signup(app: &Router, username: &str, email: &str, password: &str, role: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            json!({ "username": username, "email": email, "password": password, "role": role }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

async fn login(app: &Router, email: &str, password: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": email, "password": password }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

#[tokio::test]
async fn test_signup_login_and_protected_profile() {
    let t = test_app();

    let created = signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;
    assert_eq!(created["username"], "alice");
    assert_eq!(created["role"], "student");
    // The stored secret never leaves the server.
    assert!(created.get("password_hash").is_none());

    let login_body = login(&t.app, "alice@example.com", "s3cret").await;
    let token = login_body["token"].as_str().unwrap();
    assert_eq!(login_body["user"]["username"], "alice");

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let me = body_json(response).await;
    assert_eq!(me["username"], "alice");

    // Same call with the token truncated by one character: invalid token,
    // not any other rejection kind.
    let truncated = &token[..token.len() - 1];
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header("authorization", format!("Bearer {truncated}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err = body_json(response).await;
    assert_eq!(err["error"]["code"], "AUTH_003");
}

#[tokio::test]
async fn test_missing_credential_is_auth_required() {
    let t = test_app();
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err = body_json(response).await;
    assert_eq!(err["error"]["code"], "AUTH_002");
}

#[tokio::test]
async fn test_valid_token_for_missing_identity_is_stale() {
    let t = test_app();

    // Well-formed, unexpired token whose subject was never created.
    let token = t.state.tokens.issue(Uuid::new_v4()).unwrap();
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/users/me")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let err = body_json(response).await;
    assert_eq!(err["error"]["code"], "AUTH_004");
}

#[tokio::test]
async fn test_duplicate_signup_conflicts() {
    let t = test_app();
    signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;

    let response = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/signup",
            json!({
                "username": "impostor",
                "email": "alice@example.com",
                "password": "other-password",
                "role": "student"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // The original record is untouched: alice still logs in.
    login(&t.app, "alice@example.com", "s3cret").await;
}

#[tokio::test]
async fn test_login_failures_are_not_enumerable() {
    let t = test_app();
    signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;

    let wrong_password = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "alice@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();
    let unknown_handle = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "nobody@example.com", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_handle.status(), StatusCode::UNAUTHORIZED);

    // Byte-identical outward responses for the two internal causes.
    let a = body_json(wrong_password).await;
    let b = body_json(unknown_handle).await;
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_mentor_session_role_check_lives_in_the_route() {
    let t = test_app();
    signup(&t.app, "bob", "bob@example.com", "mentor-pass", "mentor").await;
    signup(&t.app, "carol", "carol@example.com", "student-pass", "student").await;

    let bob_token = login(&t.app, "bob@example.com", "mentor-pass").await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let carol_token = login(&t.app, "carol@example.com", "student-pass").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let session = json!({ "title": "Intro to systems design", "date": "2026-09-01T10:00:00Z" });

    // Mentor: admitted by the gate AND allowed by the route.
    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/users/me/sessions",
            &bob_token,
            session.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Student: admitted by the gate (not 401), rejected by the route (403).
    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/users/me/sessions",
            &carol_token,
            session,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_profile_update_without_password_keeps_login_working() {
    let t = test_app();
    let created = signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;
    let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
    let token = login(&t.app, "alice@example.com", "s3cret").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let hash_before = t
        .state
        .store
        .find_user_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;

    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "PATCH",
            "/api/users/me",
            &token,
            json!({ "bio": "hello", "skills": ["rust", "sql"] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["bio"], "hello");

    // No password in the patch: the stored secret is byte-for-byte the same.
    let hash_after = t
        .state
        .store
        .find_user_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;
    assert_eq!(hash_before, hash_after);

    login(&t.app, "alice@example.com", "s3cret").await;
}

#[tokio::test]
async fn test_password_change_rehashes_and_old_password_stops_working() {
    let t = test_app();
    let created = signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;
    let id = Uuid::parse_str(created["id"].as_str().unwrap()).unwrap();
    let token = login(&t.app, "alice@example.com", "s3cret").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let hash_before = t
        .state
        .store
        .find_user_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;

    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "PATCH",
            "/api/users/me",
            &token,
            json!({ "password": "new-secret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let hash_after = t
        .state
        .store
        .find_user_by_id(id)
        .await
        .unwrap()
        .unwrap()
        .password_hash;
    assert_ne!(hash_before, hash_after);

    let old_login = t
        .app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "alice@example.com", "password": "s3cret" }),
        ))
        .await
        .unwrap();
    assert_eq!(old_login.status(), StatusCode::UNAUTHORIZED);

    login(&t.app, "alice@example.com", "new-secret").await;
}

#[tokio::test]
async fn test_feed_posts_are_attributed_to_the_resolved_identity() {
    let t = test_app();
    signup(&t.app, "alice", "alice@example.com", "s3cret", "student").await;
    let token = login(&t.app, "alice@example.com", "s3cret").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/feed",
            &token,
            json!({ "content": "first post" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let post = body_json(response).await;
    assert_eq!(post["author"], "alice");

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/feed")
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let posts = body_json(response).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_resume_review_flow() {
    let t = test_app();
    signup(&t.app, "carol", "carol@example.com", "student-pass", "student").await;
    signup(&t.app, "bob", "bob@example.com", "mentor-pass", "mentor").await;
    let carol = login(&t.app, "carol@example.com", "student-pass").await["token"]
        .as_str()
        .unwrap()
        .to_string();
    let bob = login(&t.app, "bob@example.com", "mentor-pass").await["token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            "/api/resumes",
            &carol,
            json!({ "file_name": "carol-resume.pdf" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let resume = body_json(response).await;
    let resume_id = resume["id"].as_str().unwrap().to_string();

    let response = t
        .app
        .clone()
        .oneshot(authed_json_request(
            "POST",
            &format!("/api/resumes/{resume_id}/comments"),
            &bob,
            json!({ "text": "Lead with the internship experience." }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/resumes/{resume_id}"))
                .header("authorization", format!("Bearer {carol}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let detailed = body_json(response).await;
    assert_eq!(detailed["comments"].as_array().unwrap().len(), 1);

    // Unknown resume id: 404, not a gate failure.
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/resumes/{}", Uuid::new_v4()))
                .header("authorization", format!("Bearer {carol}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mentor_directory_filters() {
    let t = test_app();

    use chrono::Utc;
    for (name, company, skills, domains) in [
        ("Ada", "Acme", vec!["rust"], vec!["systems"]),
        ("Grace", "Navy", vec!["cobol"], vec!["compilers"]),
    ] {
        t.state
            .store
            .create_mentor_profile(MentorProfile {
                id: Uuid::new_v4(),
                name: name.to_string(),
                bio: format!("{name} mentors people"),
                company: company.to_string(),
                skills: skills.into_iter().map(String::from).collect(),
                domains: domains.into_iter().map(String::from).collect(),
                created_at: Utc::now(),
            })
            .await
            .unwrap();
    }

    // Public route, no credential needed.
    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/mentors?skills=rust,go&companies=Acme")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let mentors = body_json(response).await;
    assert_eq!(mentors.as_array().unwrap().len(), 1);
    assert_eq!(mentors[0]["name"], "Ada");

    let response = t
        .app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/mentors?search=grace")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let mentors = body_json(response).await;
    assert_eq!(mentors.as_array().unwrap().len(), 1);
    assert_eq!(mentors[0]["name"], "Grace");
}
