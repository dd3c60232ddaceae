use super::*;
use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde_json::{json, Value};
use shared::{
    domain::{Company, CompanyId, DEMO_COMPANY_ID},
    error::{FailureKind, GatewayError},
    protocol::GeneratedContentItem,
};
use tokio::{net::TcpListener, sync::Mutex};

const SLOW_RESPONSE: Duration = Duration::from_secs(5);
const SHORT_TIMEOUT: Duration = Duration::from_millis(200);

async fn serve(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

fn session_for(url: &str) -> Arc<DashboardSession> {
    let config = ClientConfig::new(url)
        .expect("config")
        .with_request_timeout(SHORT_TIMEOUT)
        .expect("timeout");
    DashboardSession::connect(config).expect("http client")
}

fn fixed_response(status: StatusCode, body: impl Into<String>) -> Router {
    let body = body.into();
    let handler = move || {
        let body = body.clone();
        async move { (status, body) }
    };
    Router::new()
        .route("/api/companies", get(handler.clone()))
        .route("/api/generate-content", post(handler.clone()))
        .route("/api/health", get(handler))
}

#[derive(Clone, Copy)]
enum Breakage {
    ServerError,
    Malformed,
    Slow,
}

#[derive(Clone)]
struct FlakyDirectory {
    calls: Arc<AtomicUsize>,
    breakage: Breakage,
}

async fn flaky_companies(State(state): State<FlakyDirectory>) -> (StatusCode, String) {
    if state.calls.fetch_add(1, Ordering::SeqCst) == 0 {
        return (
            StatusCode::OK,
            json!([{ "id": "acme", "name": "Acme Corp" }]).to_string(),
        );
    }
    match state.breakage {
        Breakage::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "boom".to_string()),
        Breakage::Malformed => (StatusCode::OK, "{\"companies\": ".to_string()),
        Breakage::Slow => {
            tokio::time::sleep(SLOW_RESPONSE).await;
            (StatusCode::OK, "[]".to_string())
        }
    }
}

async fn spawn_flaky_directory(breakage: Breakage) -> String {
    let state = FlakyDirectory {
        calls: Arc::new(AtomicUsize::new(0)),
        breakage,
    };
    serve(
        Router::new()
            .route("/api/companies", get(flaky_companies))
            .with_state(state),
    )
    .await
}

#[derive(Clone)]
struct CapturingServer {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn capture_generate(
    State(state): State<CapturingServer>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let topic = body["topic"].clone();
    state.bodies.lock().await.push(body);
    Json(json!({
        "generated_content": [{ "platform": "instagram", "content": topic }]
    }))
}

async fn spawn_capturing_server() -> (String, Arc<Mutex<Vec<Value>>>) {
    let bodies = Arc::new(Mutex::new(Vec::new()));
    let state = CapturingServer {
        bodies: Arc::clone(&bodies),
    };
    let url = serve(
        Router::new()
            .route("/api/generate-content", post(capture_generate))
            .with_state(state),
    )
    .await;
    (url, bodies)
}

#[tokio::test]
async fn directory_load_keeps_response_order_and_fields() {
    let directory = json!([
        { "id": "demo-company-3", "name": "Creative Marketing Agency", "industry": "Marketing" },
        { "id": "demo-company-1", "name": "Tech Innovators Inc", "industry": "Technology",
          "description": "Leading technology company" },
        { "id": "demo-company-2", "name": "Green Energy Solutions", "industry": "Energy" }
    ]);
    let expected: Vec<Company> = serde_json::from_value(directory.clone()).expect("companies");
    let url = serve(fixed_response(StatusCode::OK, directory.to_string())).await;
    let session = session_for(&url);

    let outcome = session.load_companies().await;

    assert_eq!(outcome, DirectoryOutcome::Loaded { count: 3 });
    assert_eq!(session.snapshot().await.companies(), expected.as_slice());
}

#[tokio::test]
async fn acme_directory_leaves_demo_company_selected() {
    let url = serve(fixed_response(
        StatusCode::OK,
        json!([{ "id": "acme", "name": "Acme Corp" }]).to_string(),
    ))
    .await;
    let session = session_for(&url);

    session.spawn_company_load().await.expect("join");

    let state = session.snapshot().await;
    assert_eq!(state.companies(), &[Company::new("acme", "Acme Corp")]);
    assert_eq!(state.selected_company_id().as_str(), DEMO_COMPANY_ID);
}

#[tokio::test]
async fn directory_failures_leave_previous_companies_in_place() {
    let cases = [
        (Breakage::ServerError, FailureKind::Response),
        (Breakage::Malformed, FailureKind::Malformed),
        (Breakage::Slow, FailureKind::Transport),
    ];

    for (breakage, expected_kind) in cases {
        let url = spawn_flaky_directory(breakage).await;
        let session = session_for(&url);

        assert_eq!(
            session.load_companies().await,
            DirectoryOutcome::Loaded { count: 1 }
        );
        let DirectoryOutcome::Failed(err) = session.load_companies().await else {
            panic!("second load should fail");
        };

        assert_eq!(err.kind(), expected_kind);
        let state = session.snapshot().await;
        assert_eq!(state.companies(), &[Company::new("acme", "Acme Corp")]);
        assert_eq!(
            state.last_failure().map(|notice| notice.kind),
            Some(expected_kind)
        );
    }
}

#[tokio::test]
async fn unreachable_directory_is_a_transport_failure() {
    let session = session_for(&unreachable_url().await);

    let outcome = session.load_companies().await;

    assert!(matches!(
        outcome,
        DirectoryOutcome::Failed(GatewayError::Transport(_))
    ));
    assert!(session.snapshot().await.companies().is_empty());
}

#[tokio::test]
async fn generate_returns_backend_items_for_topic() {
    let url = serve(fixed_response(
        StatusCode::OK,
        json!({ "generated_content": [{ "platform": "instagram", "text": "Hello" }] }).to_string(),
    ))
    .await;
    let session = session_for(&url);

    let items = session.generate("safety").await;

    assert_eq!(
        items,
        vec![GeneratedContentItem(
            json!({ "platform": "instagram", "text": "Hello" })
        )]
    );
}

#[tokio::test]
async fn generate_degrades_to_empty_list_on_server_error() {
    let url = serve(fixed_response(StatusCode::INTERNAL_SERVER_ERROR, "{}")).await;
    let session = session_for(&url);

    assert!(session.generate("safety").await.is_empty());
    assert_eq!(
        session.try_generate("safety").await,
        Err(GatewayError::Response { status: 500 })
    );
}

#[tokio::test]
async fn generate_degrades_to_empty_list_on_malformed_body() {
    let url = serve(fixed_response(StatusCode::OK, json!({ "items": [] }).to_string())).await;
    let session = session_for(&url);

    assert!(session.generate("safety").await.is_empty());
    assert!(matches!(
        session.try_generate("safety").await,
        Err(GatewayError::Malformed(_))
    ));
}

#[tokio::test]
async fn generate_degrades_to_empty_list_when_backend_is_down_or_slow() {
    let down = session_for(&unreachable_url().await);
    assert!(down.generate("safety").await.is_empty());

    let slow_handler = || async {
        tokio::time::sleep(SLOW_RESPONSE).await;
        Json(json!({ "generated_content": [{ "platform": "facebook" }] }))
    };
    let url = serve(Router::new().route("/api/generate-content", post(slow_handler))).await;
    let slow = session_for(&url);

    assert!(slow.generate("safety").await.is_empty());
    assert!(matches!(
        slow.try_generate("safety").await,
        Err(GatewayError::Transport(_))
    ));
}

#[tokio::test]
async fn generate_request_has_fixed_platforms_and_audience_for_any_topic() {
    let (url, bodies) = spawn_capturing_server().await;
    let session = session_for(&url);
    let long_topic = "osha ".repeat(4_000);
    let topics = [
        String::new(),
        long_topic,
        "emoji 🚀 & <script>\"quoted\"</script>\n\ttabs".to_string(),
    ];

    for (idx, topic) in topics.iter().enumerate() {
        if idx == 1 {
            session.set_selected_company("acme").await;
        }
        let items = session.generate(topic).await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].body(), Some(topic.as_str()));
    }

    let bodies = bodies.lock().await;
    assert_eq!(bodies.len(), topics.len());
    for (idx, body) in bodies.iter().enumerate() {
        assert_eq!(body["platforms"], json!(["instagram", "facebook", "linkedin"]));
        assert_eq!(body["audience_level"], json!("general"));
        assert_eq!(body["topic"], json!(topics[idx]));
        let expected_company = if idx == 0 { DEMO_COMPANY_ID } else { "acme" };
        assert_eq!(body["company_id"], json!(expected_company));
    }
}

#[tokio::test]
async fn smart_generate_sends_fixed_topic_and_stores_result() {
    let (url, bodies) = spawn_capturing_server().await;
    let session = session_for(&url);

    let outcome = session.smart_generate().await;

    let GenerationOutcome::Generated(items) = outcome else {
        panic!("smart generate should succeed");
    };
    assert_eq!(items[0].body(), Some(SMART_GENERATE_TOPIC));
    assert_eq!(session.snapshot().await.generated_content(), items.as_slice());
    assert_eq!(
        bodies.lock().await[0]["topic"],
        json!("trending safety topic")
    );
}

#[tokio::test]
async fn health_check_reads_backend_status() {
    let url = serve(fixed_response(
        StatusCode::OK,
        json!({
            "status": "healthy",
            "message": "PostVelocity API is running",
            "timestamp": "2026-10-19T12:00:00",
            "version": "1.0.0"
        })
        .to_string(),
    ))
    .await;
    let session = session_for(&url);

    let health = session.health().await.expect("health");

    assert_eq!(health.status, "healthy");
    assert_eq!(health.version.as_deref(), Some("1.0.0"));
}

#[tokio::test]
async fn company_id_in_request_is_the_raw_selected_reference() {
    let (url, bodies) = spawn_capturing_server().await;
    let session = session_for(&url);
    session
        .set_selected_company(CompanyId::from("not-in-directory"))
        .await;

    session.generate("safety").await;

    assert_eq!(bodies.lock().await[0]["company_id"], json!("not-in-directory"));
}

#[tokio::test]
async fn orchestrator_generates_for_explicit_company() {
    let (url, bodies) = spawn_capturing_server().await;
    let api = HttpDashboardApi::new(ClientConfig::new(&url).expect("config")).expect("client");
    let orchestrator = ContentOrchestrator::new(Arc::new(api));

    let items = orchestrator
        .generate(&CompanyId::from("demo-company-2"), "OSHA Updates")
        .await;

    assert_eq!(items[0].body(), Some("OSHA Updates"));
    assert_eq!(bodies.lock().await[0]["company_id"], json!("demo-company-2"));
}

#[tokio::test]
async fn orchestrator_degrades_to_empty_list_on_server_error() {
    let url = serve(fixed_response(StatusCode::BAD_GATEWAY, "{}")).await;
    let api = HttpDashboardApi::new(ClientConfig::new(&url).expect("config")).expect("client");
    let orchestrator = ContentOrchestrator::new(Arc::new(api));

    let items = orchestrator
        .generate(&CompanyId::from("acme"), "safety")
        .await;

    assert!(items.is_empty());
}

#[tokio::test]
async fn directory_loader_reports_status_failures() {
    let url = serve(fixed_response(StatusCode::SERVICE_UNAVAILABLE, "down")).await;
    let api = HttpDashboardApi::new(ClientConfig::new(&url).expect("config")).expect("client");
    let loader = CompanyDirectoryLoader::new(Arc::new(api));

    assert_eq!(
        loader.fetch().await,
        Err(GatewayError::Response { status: 503 })
    );
}
