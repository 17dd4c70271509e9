//! End-to-end journal flows over the in-memory store and a scripted
//! generator.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use serde_json::{Value, json};

use unbothered_backend::Trace;
use unbothered_backend::domain::ports::{FeedbackGenerator, FeedbackGeneratorError};
use unbothered_backend::domain::{
    FeedbackPrompt, JournalCommandService, JournalQueryService, TRACE_ID_HEADER,
};
use unbothered_backend::inbound::http::configure;
use unbothered_backend::inbound::http::health::{HealthState, index, live, ready};
use unbothered_backend::inbound::http::state::HttpState;
use unbothered_backend::outbound::persistence::InMemoryJournalEntryRepository;

/// Clock that moves forward one minute on every read.
struct SteppingClock {
    start: DateTime<Utc>,
    ticks: AtomicI64,
}

impl SteppingClock {
    fn new() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(2026, 1, 5, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
            ticks: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
        self.start + Duration::minutes(tick)
    }
}

/// Generator replaying queued replies in order.
#[derive(Default)]
struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, FeedbackGeneratorError>>>,
}

impl ScriptedGenerator {
    fn with_replies(replies: impl IntoIterator<Item = Result<String, FeedbackGeneratorError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
        }
    }
}

#[async_trait]
impl FeedbackGenerator for ScriptedGenerator {
    async fn generate(&self, _prompt: &FeedbackPrompt) -> Result<String, FeedbackGeneratorError> {
        self.replies
            .lock()
            .expect("replies lock")
            .pop_front()
            .unwrap_or_else(|| Err(FeedbackGeneratorError::transport("no scripted reply left")))
    }
}

fn feedback_reply(summary: &str) -> Result<String, FeedbackGeneratorError> {
    Ok(json!({
        "summary": summary,
        "keywords": [{ "keyword": "work", "summary": "Deadlines raised the pressure." }]
    })
    .to_string())
}

fn journal_app(
    generator: ScriptedGenerator,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let repo = Arc::new(InMemoryJournalEntryRepository::new());
    let command = JournalCommandService::new(
        Arc::new(generator),
        Arc::clone(&repo),
        Arc::new(SteppingClock::new()),
    );
    let query = JournalQueryService::new(repo);
    let state = HttpState::new(Arc::new(command), Arc::new(query));
    let health = HealthState::new();
    health.mark_ready();

    App::new()
        .app_data(web::Data::new(health))
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure)
        .service(index)
        .service(ready)
        .service(live)
}

fn submission(text: &str, user_id: Value) -> Value {
    json!({ "text": text, "feeling": "Stressed", "userId": user_id, "name": "Riley" })
}

async fn call_json<S>(app: &S, request: actix_http::Request) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let response = actix_test::call_service(app, request).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    (status, serde_json::from_slice(&body).expect("json body"))
}

async fn submit<S>(app: &S, body: Value) -> (StatusCode, Value)
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri("/api/journal")
        .set_json(body)
        .to_request();
    call_json(app, request).await
}

async fn list<S>(app: &S, user_id: &str) -> Vec<Value>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/journal/{user_id}"))
        .to_request();
    let (status, body) = call_json(app, request).await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("array body").clone()
}

#[actix_web::test]
async fn submissions_are_listed_newest_first_and_deletable() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::with_replies([
        feedback_reply("First reply."),
        feedback_reply("Second reply."),
        feedback_reply("Third reply."),
    ])))
    .await;

    for text in ["one", "two", "three"] {
        let (status, body) = submit(&app, submission(text, json!("u-1"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["keywords"][0]["keyword"], json!("work"));
    }

    let entries = list(&app, "u-1").await;
    let texts: Vec<&str> = entries
        .iter()
        .map(|entry| entry["text"].as_str().expect("text"))
        .collect();
    assert_eq!(texts, ["three", "two", "one"]);
    assert_eq!(entries[0]["summary"], json!("Third reply."));
    assert_eq!(entries[0]["name"], json!("Riley"));
    assert_eq!(entries[0]["feeling"], json!("Stressed"));
    assert_eq!(entries[2]["date_created"], json!("2026-01-05T08:00:00.000Z"));

    let middle_id = entries[1]["id"].as_str().expect("id").to_owned();
    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/journal/{middle_id}"))
        .to_request();
    let (status, body) = call_json(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Entry deleted successfully" }));

    let remaining: Vec<Value> = list(&app, "u-1").await;
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|entry| entry["id"] != json!(middle_id)));

    let request = actix_test::TestRequest::delete()
        .uri(&format!("/api/journal/delete/{middle_id}"))
        .to_request();
    let (status, body) = call_json(&app, request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Entry not found" }));
}

#[actix_web::test]
async fn entries_are_scoped_to_their_author() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::with_replies([
        feedback_reply("For a."),
        feedback_reply("For b."),
    ])))
    .await;

    submit(&app, submission("mine", json!(7))).await;
    submit(&app, submission("theirs", json!("8"))).await;

    let mine = list(&app, "7").await;
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["user_id"], json!("7"));
    assert!(list(&app, "nobody").await.is_empty());
}

#[actix_web::test]
async fn missing_fields_are_rejected_without_storing() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::default())).await;

    let (status, body) = submit(&app, json!({ "text": "hello", "userId": "u-2" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["keywords"], json!([]));
    assert!(list(&app, "u-2").await.is_empty());
}

#[actix_web::test]
async fn generation_failure_stores_nothing() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::with_replies([Err(
        FeedbackGeneratorError::status(503_u16, "model loading"),
    )])))
    .await;

    let (status, body) = submit(&app, submission("lost", json!("u-3"))).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "summary": "Error generating advice.", "keywords": [] }));
    assert!(list(&app, "u-3").await.is_empty());
}

#[actix_web::test]
async fn prose_reply_is_kept_as_summary() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::with_replies([Ok(
        "You handled a hard day well.".to_owned(),
    )])))
    .await;

    let (status, body) = submit(&app, submission("long day", json!("u-4"))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "summary": "You handled a hard day well.", "keywords": [] })
    );
    assert_eq!(list(&app, "u-4").await.len(), 1);
}

#[actix_web::test]
async fn malformed_delete_id_is_not_found() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::default())).await;

    let request = actix_test::TestRequest::delete()
        .uri("/api/journal/12345")
        .to_request();
    let (status, body) = call_json(&app, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Entry not found" }));
}

#[actix_web::test]
async fn root_banner_and_probes_respond() {
    let app = actix_test::init_service(journal_app(ScriptedGenerator::default())).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body = actix_test::read_body(response).await;
    assert_eq!(body.as_ref(), b"Journal AI API is running...");

    for probe in ["/health/ready", "/health/live"] {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri(probe).to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "{probe}");
    }
}
