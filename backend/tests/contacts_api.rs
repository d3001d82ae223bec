//! End-to-end scenarios over HTTP with in-memory adapters.
//!
//! The app is assembled from the public library surface exactly as the
//! server binary does it, except that storage lives in memory and the clock
//! advances one second per reading so list ordering is deterministic.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::{Duration, TimeZone, Utc};
use mockable::{Clock, MockClock};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use contacts_backend::Trace;
use contacts_backend::domain::{AccountService, ContactsService, TRACE_ID_HEADER};
use contacts_backend::inbound::http::api_scope;
use contacts_backend::inbound::http::identity::AUTH_TOKEN_HEADER;
use contacts_backend::inbound::http::state::HttpState;
use contacts_backend::inbound::http::validation::json_config;
use contacts_backend::outbound::memory::{InMemoryContactRepository, InMemoryUserRepository};
use contacts_backend::outbound::security::{BcryptHasher, JwtTokenIssuer, TokenSettings};

fn stepping_clock() -> Arc<dyn Clock> {
    let start = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp");
    let ticks = Arc::new(AtomicI64::new(0));
    let mut clock = MockClock::new();
    clock
        .expect_utc()
        .returning(move || start + Duration::seconds(ticks.fetch_add(1, Ordering::SeqCst)));
    Arc::new(clock)
}

#[fixture]
fn state() -> HttpState {
    let clock = stepping_clock();
    let tokens = Arc::new(JwtTokenIssuer::new(
        TokenSettings::new(Some("integration-secret".to_owned()), 3600),
        Arc::clone(&clock),
    ));
    let accounts = Arc::new(AccountService::new(
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(BcryptHasher::new(4)),
        tokens.clone(),
        Arc::clone(&clock),
    ));
    let contacts = Arc::new(ContactsService::new(
        Arc::new(InMemoryContactRepository::default()),
        clock,
    ));
    HttpState {
        registration: accounts.clone(),
        login: accounts.clone(),
        profile: accounts,
        contacts: contacts.clone(),
        contacts_query: contacts,
        tokens,
    }
}

async fn call<S>(app: &S, req: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let res = test::call_service(app, req.to_request()).await;
    assert!(res.headers().contains_key(TRACE_ID_HEADER));
    let status = res.status();
    let body = test::read_body(res).await;
    (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
}

async fn register<S>(app: &S, name: &str, email: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = call(
        app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": name, "email": email, "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["token"].as_str().expect("token").to_owned()
}

fn authed(req: test::TestRequest, token: &str) -> test::TestRequest {
    req.insert_header((AUTH_TOKEN_HEADER, token.to_owned()))
}

#[rstest]
#[actix_web::test]
async fn contact_book_lifecycle(state: HttpState) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;

    let ann = register(&app, "Ann", "a@x.com").await;

    // Registering the same email again is refused.
    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({"name": "Ann", "email": "a@x.com", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "User with that email already exists!");

    let (status, body) = call(&app, authed(test::TestRequest::get().uri("/api/contacts"), &ann)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "no_contacts");

    let (status, bob) = call(
        &app,
        authed(test::TestRequest::post().uri("/api/contacts"), &ann)
            .set_json(json!({"name": "Bob", "email": "b@x.com", "phone": "555"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bob["type"], "personal");

    let (status, body) = call(
        &app,
        authed(test::TestRequest::post().uri("/api/contacts"), &ann)
            .set_json(json!({"name": "Bobby", "email": "other@x.com", "phone": "555"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Contact with this Phone Number already exists!");

    let (status, cy) = call(
        &app,
        authed(test::TestRequest::post().uri("/api/contacts"), &ann)
            .set_json(json!({"name": "Cy", "email": "c@x.com", "phone": "556", "type": "work"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, listed) =
        call(&app, authed(test::TestRequest::get().uri("/api/contacts"), &ann)).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = listed
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["name"].as_str().expect("name"))
        .collect();
    assert_eq!(names, ["Cy", "Bob"]);

    let bob_uri = format!("/api/contacts/{}", bob["id"].as_str().expect("id"));

    // Touching only the type never collides with the contact itself.
    let (status, updated) = call(
        &app,
        authed(test::TestRequest::put().uri(&bob_uri), &ann).set_json(json!({"type": "family"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["type"], "family");
    assert_eq!(updated["phone"], "555");

    // Moving Bob onto Cy's email is a duplicate.
    let (status, body) = call(
        &app,
        authed(test::TestRequest::put().uri(&bob_uri), &ann).set_json(json!({"email": cy["email"]})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Contact with this Email already exists!");

    let eve = register(&app, "Eve", "e@x.com").await;
    let (status, body) =
        call(&app, authed(test::TestRequest::delete().uri(&bob_uri), &eve)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Un-Authorized Attempt!");

    // Eve may reuse Ann's contact details in her own book.
    let (status, _) = call(
        &app,
        authed(test::TestRequest::post().uri("/api/contacts"), &eve)
            .set_json(json!({"name": "Bob", "email": "b@x.com", "phone": "555"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, removed) =
        call(&app, authed(test::TestRequest::delete().uri(&bob_uri), &ann)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(removed["id"], bob["id"]);

    let (status, _) = call(&app, authed(test::TestRequest::delete().uri(&bob_uri), &ann)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn login_and_profile_round_trip(state: HttpState) {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .wrap(Trace)
            .service(api_scope()),
    )
    .await;
    register(&app, "Ann", "a@x.com").await;

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/auth")
            .set_json(json!({"email": "a@x.com", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "Wrong Password!");

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/auth")
            .set_json(json!({"email": "nobody@x.com", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["msg"], "No account was found with this email id!");

    let (status, body) = call(
        &app,
        test::TestRequest::post()
            .uri("/api/auth")
            .set_json(json!({"email": "a@x.com", "password": "secret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().expect("token").to_owned();

    let (status, me) = call(&app, authed(test::TestRequest::get().uri("/api/auth"), &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "a@x.com");
    assert!(me.get("password").is_none());
    assert!(me.get("passwordHash").is_none());

    let (status, body) = call(
        &app,
        authed(test::TestRequest::get().uri("/api/auth"), "not-a-token"),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["msg"], "Invalid Token!");
}
