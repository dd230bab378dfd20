//! End-to-end account and session flows over the in-memory adapters.

mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

use backend::inbound::ws::RecipeFeed;
use support::http::{register, session_cookie};
use support::{InMemoryStore, state_over, test_app};

#[actix_web::test]
async fn register_issues_a_session_and_exposes_the_account() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "email": "Cook@Example.com", "password": "s3cret" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let cookie = session_cookie(&res);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body.get("email").and_then(Value::as_str),
        Some("cook@example.com"),
        "email is stored lower-cased"
    );

    let me = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/users/me")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(me.status(), StatusCode::OK);
    let me_body: Value = test::read_body_json(me).await;
    assert_eq!(me_body.get("id"), body.get("id"));
    assert_eq!(
        me_body.get("favorites").and_then(Value::as_array).map(Vec::len),
        Some(0)
    );
}

#[actix_web::test]
async fn duplicate_email_is_a_conflict() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    register(&app, "cook@example.com", "one").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "email": "cook@example.com", "password": "two" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn login_rejects_a_wrong_password() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    register(&app, "cook@example.com", "right").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "cook@example.com", "password": "wrong" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({ "email": "cook@example.com", "password": "right" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_expires_the_session_cookie() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    let cookie = register(&app, "cook@example.com", "pw").await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/logout")
            .cookie(cookie)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let removal = res
        .response()
        .cookies()
        .find(|c| c.name() == "session")
        .expect("removal cookie issued");
    assert!(removal.value().is_empty(), "cookie value cleared");
}

#[actix_web::test]
async fn unauthenticated_requests_are_rejected() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    for uri in [
        "/api/v1/recipes",
        "/api/v1/users/me",
        "/api/v1/users/me/favorites",
        "/api/v1/dashboard",
    ] {
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "GET {uri}");
    }
}

#[actix_web::test]
async fn malformed_credentials_name_the_offending_field() {
    let store = InMemoryStore::new();
    let app = test::init_service(test_app(state_over(&store, &RecipeFeed::new()))).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "email": "not-an-email", "password": "pw" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body.pointer("/details/field").and_then(Value::as_str),
        Some("email")
    );
}
