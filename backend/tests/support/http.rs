//! Typed HTTP helpers shared by the flow tests.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

/// Register an account and return its session cookie.
pub async fn register<S, B>(app: &S, email: &str, password: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/register")
            .set_json(json!({ "email": email, "password": password }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "registration succeeds");
    session_cookie(&res)
}

/// Extract the session cookie from a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie present")
        .into_owned()
}

/// Create a recipe as the given session and return its id.
pub async fn create_recipe<S, B>(
    app: &S,
    session: &Cookie<'static>,
    title: &str,
    ingredients: &[&str],
    tags: &[&str],
) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/recipes")
            .cookie(session.clone())
            .set_json(json!({
                "title": title,
                "ingredients": ingredients,
                "steps": ["prepare", "cook"],
                "tags": tags,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED, "recipe creation succeeds");

    let body: Value = test::read_body_json(res).await;
    body.get("id")
        .and_then(Value::as_str)
        .expect("recipe id in response")
        .to_owned()
}

/// Issue a GET with the session cookie and return the JSON body, asserting
/// a 200.
pub async fn get_json<S, B>(app: &S, session: &Cookie<'static>, uri: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::get()
            .uri(uri)
            .cookie(session.clone())
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK, "GET {uri} succeeds");
    test::read_body_json(res).await
}
