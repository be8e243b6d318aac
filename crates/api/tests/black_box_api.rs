use std::sync::Arc;

use async_trait::async_trait;
use moodlens_ai::{
    ClassifierError, ClassifierFactory, ClassifierProvider, ClassifierResult, FixedClassifier,
    TextClassifier,
};
use moodlens_api::app::feedback::InMemoryFeedbackSink;
use moodlens_api::app::services::AppContext;
use moodlens_api::app::session_store::{InMemorySessionStore, SessionStore};
use moodlens_core::{ClassificationResult, ResultSet};
use reqwest::StatusCode;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(ctx: AppContext) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let app = moodlens_api::app::build_app(Arc::new(ctx));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A browser: keeps its session cookie between requests.
fn browser() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .expect("client")
}

fn context_with(classifier: Arc<dyn TextClassifier>) -> AppContext {
    AppContext::new(Arc::new(ClassifierProvider::ready(classifier)))
}

async fn page(res: reqwest::Response) -> (StatusCode, String) {
    let status = res.status();
    (status, res.text().await.unwrap())
}

async fn get_started(client: &reqwest::Client, server: &TestServer) -> String {
    let (status, body) = page(client.post(server.url("/start")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn analyze(client: &reqwest::Client, server: &TestServer, text: &str) -> (StatusCode, String) {
    page(
        client
            .post(server.url("/analyze"))
            .form(&[("text", text)])
            .send()
            .await
            .unwrap(),
    )
    .await
}

struct FailingClassifier;

#[async_trait]
impl TextClassifier for FailingClassifier {
    fn model_id(&self) -> &str {
        "test/failing"
    }

    async fn classify(&self, _text: &str) -> ClassifierResult<ResultSet> {
        Err(ClassifierError::Endpoint {
            status: 500,
            message: "backend exploded".into(),
        })
    }
}

/// A model that can never be loaded.
struct UnloadableModel;

#[async_trait]
impl ClassifierFactory for UnloadableModel {
    fn model(&self) -> &str {
        "test/missing"
    }

    async fn load(&self) -> ClassifierResult<Arc<dyn TextClassifier>> {
        Err(ClassifierError::model_load("test/missing", "model not found on hub"))
    }
}

#[tokio::test]
async fn health_is_ok() {
    let server = TestServer::spawn(context_with(Arc::new(FixedClassifier::mental_health_demo()))).await;

    let res = reqwest::get(server.url("/health")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn first_visit_shows_landing_and_issues_a_session_cookie() {
    let server = TestServer::spawn(context_with(Arc::new(FixedClassifier::mental_health_demo()))).await;

    let res = reqwest::get(server.url("/")).await.unwrap();
    let cookie = res
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cookie.starts_with("moodlens_session="));
    assert!(cookie.contains("HttpOnly"));

    let (status, body) = page(res).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("🚀 Get Started"));
    assert!(!body.contains("🔎 Analyze"));
}

#[tokio::test]
async fn analyze_before_get_started_stays_on_landing() {
    let fixed = Arc::new(FixedClassifier::mental_health_demo());
    let server = TestServer::spawn(context_with(fixed.clone())).await;
    let client = browser();

    let (status, body) = analyze(&client, &server, "I can't sleep").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("🚀 Get Started"));
    assert!(!body.contains("Primary Result"));
    assert_eq!(fixed.calls(), 0);
}

#[tokio::test]
async fn get_started_moves_to_analysis_and_never_reverts() {
    let fixed = Arc::new(FixedClassifier::mental_health_demo());
    let server = TestServer::spawn(context_with(fixed.clone())).await;
    let client = browser();

    let body = get_started(&client, &server).await;
    assert!(body.contains("🔎 Analyze"));
    assert!(!body.contains("🚀 Get Started"));

    for text in ["first message", "second message"] {
        let (status, body) = analyze(&client, &server, text).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("🔎 Analyze"));
        assert!(body.contains("Primary Result: <em>Depression</em> detected (Confidence: 61.00%)"));
    }

    // Starting again is a no-op and the last results are still shown.
    let body = get_started(&client, &server).await;
    assert!(body.contains("second message"));
    assert!(body.contains("Primary Result"));
    assert_eq!(fixed.calls(), 2);
}

#[tokio::test]
async fn whitespace_input_is_warned_about_and_not_classified() {
    let fixed = Arc::new(FixedClassifier::mental_health_demo());
    let server = TestServer::spawn(context_with(fixed.clone())).await;
    let client = browser();
    get_started(&client, &server).await;

    let (status, body) = analyze(&client, &server, "  \n\t  ").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Please enter some text before analyzing."));
    assert!(!body.contains("Primary Result"));
    assert_eq!(fixed.calls(), 0);
}

#[tokio::test]
async fn overlong_input_is_warned_about_and_not_classified() {
    let fixed = Arc::new(FixedClassifier::mental_health_demo());
    let server =
        TestServer::spawn(context_with(fixed.clone()).with_max_input_chars(20)).await;
    let client = browser();
    get_started(&client, &server).await;

    let (status, body) = analyze(&client, &server, &"worry ".repeat(10)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("the limit is 20"));
    assert_eq!(fixed.calls(), 0);
}

#[tokio::test]
async fn anxiety_result_is_rendered_as_alert_with_two_decimals() {
    let fixed = Arc::new(FixedClassifier::new(
        "test/anxiety",
        vec![
            ClassificationResult::new("Neutral", 0.05),
            ClassificationResult::new("Anxiety", 0.8734),
            ClassificationResult::new("Positive", 0.02),
        ],
    ));
    let server = TestServer::spawn(context_with(fixed)).await;
    let client = browser();
    get_started(&client, &server).await;

    let (_, body) = analyze(&client, &server, "my heart races before every meeting").await;
    assert!(body.contains("Primary Result: <em>Anxiety</em> detected (Confidence: 87.34%)"));
    assert!(body.contains("excessive worry"));
    assert!(body.contains(r#"data-band="alert" data-progress="87""#));
    assert!(body.contains(r#"data-band="benign" data-progress="5""#));
    assert!(body.contains("Submit Feedback"));
}

#[tokio::test]
async fn unknown_label_gets_generic_explanation_and_uncertain_band() {
    let fixed = Arc::new(FixedClassifier::new(
        "test/joyful",
        vec![ClassificationResult::new("Joyful", 0.75)],
    ));
    let server = TestServer::spawn(context_with(fixed)).await;
    let client = browser();
    get_started(&client, &server).await;

    let (_, body) = analyze(&client, &server, "what a day").await;
    assert!(body.contains(moodlens_core::FALLBACK_EXPLANATION));
    assert!(body.contains(r#"data-band="uncertain" data-progress="75""#));
    assert!(body.contains("🟡"));
}

#[tokio::test]
async fn sessions_are_isolated_between_browsers() {
    let sessions = Arc::new(InMemorySessionStore::new());
    let ctx = context_with(Arc::new(FixedClassifier::mental_health_demo()))
        .with_session_store(sessions.clone());
    let server = TestServer::spawn(ctx).await;
    let alice = browser();
    let bob = browser();

    get_started(&alice, &server).await;
    analyze(&alice, &server, "alice's private note").await;

    let (_, body) = page(bob.get(server.url("/")).send().await.unwrap()).await;
    assert!(body.contains("🚀 Get Started"));
    assert!(!body.contains("alice's private note"));

    get_started(&bob, &server).await;
    let (_, body) = page(bob.get(server.url("/")).send().await.unwrap()).await;
    assert!(body.contains("🔎 Analyze"));
    assert!(!body.contains("Primary Result"));
    assert!(!body.contains("private note"));
    assert_eq!(sessions.len(), 2);
}

#[tokio::test]
async fn inference_failure_shows_error_banner_and_keeps_the_session() {
    let server = TestServer::spawn(context_with(Arc::new(FailingClassifier))).await;
    let client = browser();
    get_started(&client, &server).await;

    let (status, body) = analyze(&client, &server, "hello there").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("notice error"));
    assert!(!body.contains("backend exploded"));
    assert!(body.contains("hello there"));

    let (status, body) = page(client.get(server.url("/")).send().await.unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("🔎 Analyze"));
}

#[tokio::test]
async fn feedback_is_acknowledged_and_recorded() {
    let sink = Arc::new(InMemoryFeedbackSink::new());
    let ctx = context_with(Arc::new(FixedClassifier::mental_health_demo()))
        .with_feedback_sink(sink.clone());
    let server = TestServer::spawn(ctx).await;
    let client = browser();
    get_started(&client, &server).await;
    analyze(&client, &server, "nothing feels worth it lately").await;

    let (status, body) = page(
        client
            .post(server.url("/feedback"))
            .form(&[
                ("choice", "incorrect"),
                ("corrected_label", "Anxiety"),
                ("comment", ""),
            ])
            .send()
            .await
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(moodlens_core::FEEDBACK_ACKNOWLEDGMENT));

    let records = sink.all();
    assert_eq!(records.len(), 1);
    assert!(!records[0].correct);
    assert_eq!(records[0].primary_label.as_deref(), Some("Depression"));
    assert_eq!(records[0].corrected_label.as_deref(), Some("Anxiety"));
    assert_eq!(records[0].comment, None);
}

#[tokio::test]
async fn feedback_with_unknown_choice_is_a_bad_request() {
    let sink = Arc::new(InMemoryFeedbackSink::new());
    let ctx = context_with(Arc::new(FixedClassifier::mental_health_demo()))
        .with_feedback_sink(sink.clone());
    let server = TestServer::spawn(ctx).await;
    let client = browser();
    get_started(&client, &server).await;

    let res = client
        .post(server.url("/feedback"))
        .form(&[("choice", "maybe")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(sink.all().is_empty());
}

#[tokio::test]
async fn model_that_cannot_load_answers_service_unavailable() {
    let ctx = AppContext::new(Arc::new(ClassifierProvider::new(UnloadableModel)));
    let server = TestServer::spawn(ctx).await;
    let client = browser();
    get_started(&client, &server).await;

    let (status, body) = analyze(&client, &server, "hello there").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body.contains("notice error"));
    assert!(body.contains("not available right now"));
    assert!(!body.contains("model not found on hub"));
}

#[tokio::test]
async fn rejected_input_hides_the_previous_result() {
    let sink = Arc::new(InMemoryFeedbackSink::new());
    let ctx = context_with(Arc::new(FixedClassifier::mental_health_demo()))
        .with_feedback_sink(sink.clone());
    let server = TestServer::spawn(ctx).await;
    let client = browser();
    get_started(&client, &server).await;

    let (_, body) = analyze(&client, &server, "I feel hopeless").await;
    assert!(body.contains("Primary Result"));

    let (_, body) = analyze(&client, &server, "   ").await;
    assert!(body.contains("Please enter some text before analyzing."));
    assert!(!body.contains("Primary Result"));

    let (_, body) = page(client.get(server.url("/")).send().await.unwrap()).await;
    assert!(!body.contains("Primary Result"));
    assert!(!body.contains("Submit Feedback"));

    client
        .post(server.url("/feedback"))
        .form(&[("choice", "correct")])
        .send()
        .await
        .unwrap();
    assert_eq!(sink.all()[0].primary_label, None);
}
