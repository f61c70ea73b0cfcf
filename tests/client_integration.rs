use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use nodesty::{vps::VpsAction, NodestyClient, RestClientOptions};
use serde_json::{json, Value as JsonValue};

#[derive(Clone)]
struct MockResponse {
    status: StatusCode,
    body: Option<JsonValue>,
    delay: Duration,
    headers: Vec<(&'static str, String)>,
}

impl MockResponse {
    fn json(status: StatusCode, body: JsonValue) -> Self {
        Self {
            status,
            body: Some(body),
            delay: Duration::from_millis(0),
            headers: Vec::new(),
        }
    }

    fn empty(status: StatusCode) -> Self {
        Self {
            status,
            body: None,
            delay: Duration::from_millis(0),
            headers: Vec::new(),
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    fn with_rate_limit_reset(mut self, reset_ms: u64) -> Self {
        self.headers.push(("x-ratelimit-reset", reset_ms.to_string()));
        self
    }
}

#[derive(Clone)]
struct MockState {
    responses: Arc<Mutex<HashMap<String, VecDeque<MockResponse>>>>,
    hits: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
}

async fn api_handler(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state
        .last_authorization
        .lock()
        .expect("authorization mutex must not be poisoned") = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let mock = {
        let mut routes = state
            .responses
            .lock()
            .expect("response queue mutex must not be poisoned");
        routes
            .get_mut(uri.path())
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| {
                MockResponse::json(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "no mock response available"}),
                )
            })
    };

    if !mock.delay.is_zero() {
        tokio::time::sleep(mock.delay).await;
    }

    let mut response = match mock.body {
        Some(body) => (mock.status, Json(body)).into_response(),
        None => mock.status.into_response(),
    };
    for (name, value) in mock.headers {
        response.headers_mut().insert(
            HeaderName::from_static(name),
            HeaderValue::from_str(&value).expect("header value must be valid"),
        );
    }
    response
}

struct TestServer {
    base_url: String,
    hits: Arc<AtomicUsize>,
    last_authorization: Arc<Mutex<Option<String>>>,
    task: tokio::task::JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn spawn_server(routes: Vec<(&str, Vec<MockResponse>)>) -> TestServer {
    let state = MockState {
        responses: Arc::new(Mutex::new(
            routes
                .into_iter()
                .map(|(path, queue)| (path.to_owned(), queue.into()))
                .collect(),
        )),
        hits: Arc::new(AtomicUsize::new(0)),
        last_authorization: Arc::new(Mutex::new(None)),
    };

    let app = Router::new().fallback(api_handler).with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("must bind test listener");
    let address = listener.local_addr().expect("must have local addr");
    let task = tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("mock server must run");
    });

    TestServer {
        base_url: format!("http://{address}"),
        hits: state.hits,
        last_authorization: state.last_authorization,
        task,
    }
}

fn client_for(server: &TestServer, options: RestClientOptions) -> NodestyClient {
    NodestyClient::with_options(
        "test-token",
        RestClientOptions {
            base_url: server.base_url.clone(),
            ..options
        },
    )
    .expect("must build client")
}

/// Pair with responses carrying an expired reset timestamp so retries do
/// not sit out the fixed 1000 ms fallback.
fn fast_retry_options(retry: u32) -> RestClientOptions {
    RestClientOptions {
        retry,
        rate_limit_offset_ms: 1,
        ..Default::default()
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock must be after epoch")
        .as_millis() as u64
}

fn rdns_body() -> JsonValue {
    json!({"rdns": "host.example.com"})
}

#[tokio::test]
async fn injects_pat_authorization_header() {
    let server = spawn_server(vec![(
        "/services/1/firewall/1.2.3.4/rdns",
        vec![MockResponse::json(StatusCode::OK, rdns_body())],
    )])
    .await;
    let client = client_for(&server, RestClientOptions::default());

    let response = client.firewall().get_reverse_dns("1", "1.2.3.4").await;

    assert!(response.is_success());
    let entry = response.into_data().expect("must have payload");
    assert_eq!(entry.rdns.as_deref(), Some("host.example.com"));
    assert_eq!(
        server
            .last_authorization
            .lock()
            .expect("authorization mutex must not be poisoned")
            .as_deref(),
        Some("PAT test-token")
    );
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn normalizes_typed_success_payload() {
    let server = spawn_server(vec![(
        "/services/42/vps/backups",
        vec![MockResponse::json(
            StatusCode::OK,
            json!([{
                "file": "backup-pool:backup/vm/2702/2025-08-09T18:11:41Z",
                "notes": "before major update",
                "createdAt": 1625251200000i64
            }]),
        )],
    )])
    .await;
    let client = client_for(&server, RestClientOptions::default());

    let backups = client
        .vps()
        .get_backups("42")
        .await
        .into_data()
        .expect("must have payload");

    assert_eq!(backups.len(), 1);
    assert_eq!(backups[0].notes, "before major update");
    assert_eq!(backups[0].created_at, 1_625_251_200_000);
}

#[tokio::test]
async fn error_body_on_ok_status_is_failure() {
    let server = spawn_server(vec![(
        "/users/@me",
        vec![MockResponse::json(
            StatusCode::OK,
            json!({"error": true, "message": "Invalid token"}),
        )],
    )])
    .await;
    let client = client_for(&server, RestClientOptions::default());

    let response = client.user().get_current_user().await;

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("Invalid token"));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn non_retryable_error_status_is_not_retried() {
    let server = spawn_server(vec![(
        "/services/1/vps/info",
        vec![MockResponse::json(
            StatusCode::FORBIDDEN,
            json!({"error": true, "message": "Forbidden"}),
        )],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(3));

    let response = client.vps().get_details("1").await;

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("Forbidden"));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn retries_retryable_status_until_success() {
    let server = spawn_server(vec![(
        "/services/1/firewall/1.2.3.4/rdns",
        vec![
            MockResponse::json(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": true, "message": "upstream down"}),
            )
            .with_rate_limit_reset(1),
            MockResponse::json(StatusCode::OK, rdns_body()),
        ],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(3));

    let response = client.firewall().get_reverse_dns("1", "1.2.3.4").await;

    assert!(response.is_success());
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn rate_limit_reset_paces_the_retry() {
    let reset = now_ms() + 300;
    let server = spawn_server(vec![(
        "/services/1/firewall/1.2.3.4/rdns",
        vec![
            MockResponse::json(
                StatusCode::TOO_MANY_REQUESTS,
                json!({"error": true, "message": "rate limited"}),
            )
            .with_rate_limit_reset(reset),
            MockResponse::json(StatusCode::OK, rdns_body()),
        ],
    )])
    .await;
    let client = client_for(
        &server,
        RestClientOptions {
            retry: 1,
            rate_limit_offset_ms: 50,
            ..Default::default()
        },
    );

    let started = Instant::now();
    let response = client.firewall().get_reverse_dns("1", "1.2.3.4").await;
    let elapsed = started.elapsed();

    assert!(response.is_success());
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
    // Clocks on the two code paths differ slightly; leave a margin below
    // the advertised 300 ms + 50 ms offset.
    assert!(
        elapsed >= Duration::from_millis(250),
        "retry fired after {elapsed:?}, before the advertised reset"
    );
}

#[tokio::test]
async fn missing_reset_header_uses_fixed_fallback_delay() {
    let server = spawn_server(vec![(
        "/services/1/vps/tasks",
        vec![
            MockResponse::json(
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": true, "message": "boom"}),
            ),
            MockResponse::json(StatusCode::OK, json!([])),
        ],
    )])
    .await;
    let client = client_for(
        &server,
        RestClientOptions {
            retry: 1,
            ..Default::default()
        },
    );

    let started = Instant::now();
    let response = client.vps().get_tasks("1").await;
    let elapsed = started.elapsed();

    assert!(response.is_success());
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
    assert!(
        elapsed >= Duration::from_millis(1_000),
        "fallback delay not observed, elapsed {elapsed:?}"
    );
}

#[tokio::test]
async fn disabled_retry_fails_on_first_retryable_error() {
    let server = spawn_server(vec![(
        "/services/1/vps/tasks",
        vec![
            MockResponse::json(
                StatusCode::SERVICE_UNAVAILABLE,
                json!({"error": true, "message": "upstream down"}),
            )
            .with_rate_limit_reset(1),
            MockResponse::json(StatusCode::OK, json!([])),
        ],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(0));

    let response = client.vps().get_tasks("1").await;

    assert!(!response.is_success());
    assert_eq!(response.error(), Some("upstream down"));
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn action_endpoint_with_empty_body_succeeds_without_retry() {
    let server = spawn_server(vec![(
        "/services/1/vps/action",
        vec![MockResponse::empty(StatusCode::OK)],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(3));

    let response = client.vps().perform_action("1", VpsAction::Start).await;

    assert!(response.is_success());
    assert_eq!(response.into_data(), None);
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn empty_body_on_error_status_is_retried_then_fails() {
    let server = spawn_server(vec![(
        "/services/1/vps/tasks",
        vec![
            MockResponse::empty(StatusCode::BAD_GATEWAY).with_rate_limit_reset(1),
            MockResponse::empty(StatusCode::BAD_GATEWAY).with_rate_limit_reset(1),
        ],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(1));

    let response = client.vps().get_tasks("1").await;

    assert!(!response.is_success());
    assert!(
        response
            .error()
            .is_some_and(|message| message.contains("empty response body")),
        "unexpected error: {:?}",
        response.error()
    );
    assert_eq!(server.hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn undecodable_success_body_is_a_failure_without_retry() {
    let server = spawn_server(vec![(
        "/services/1/vps/info",
        vec![MockResponse::json(StatusCode::OK, json!({"unexpected": true}))],
    )])
    .await;
    let client = client_for(&server, fast_retry_options(3));

    let response = client.vps().get_details("1").await;

    assert!(!response.is_success());
    assert!(
        response
            .error()
            .is_some_and(|message| message.contains("failed to decode")),
        "unexpected error: {:?}",
        response.error()
    );
    assert_eq!(server.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn attempt_timeout_surfaces_envelope_failure() {
    let server = spawn_server(vec![(
        "/services/1/firewall/1.2.3.4/rdns",
        vec![MockResponse::json(StatusCode::OK, rdns_body())
            .with_delay(Duration::from_millis(200))],
    )])
    .await;
    let client = client_for(
        &server,
        RestClientOptions {
            retry: 0,
            timeout_ms: 20,
            ..Default::default()
        },
    );

    let response = client.firewall().get_reverse_dns("1", "1.2.3.4").await;

    assert!(!response.is_success());
    assert!(response.error().is_some());
}

#[tokio::test]
async fn recovers_after_transport_failures() {
    // Two attempts time out, the third completes; the envelope reflects
    // only the final attempt.
    let server = spawn_server(vec![(
        "/services/1/vps/os-templates",
        vec![
            MockResponse::json(StatusCode::OK, json!([]))
                .with_delay(Duration::from_millis(200)),
            MockResponse::json(StatusCode::OK, json!([]))
                .with_delay(Duration::from_millis(200)),
            MockResponse::json(StatusCode::OK, json!([{"id": 1, "name": "Debian 9.5"}])),
        ],
    )])
    .await;
    let client = client_for(
        &server,
        RestClientOptions {
            retry: 2,
            timeout_ms: 50,
            ..Default::default()
        },
    );

    let templates = client
        .vps()
        .get_os_templates("1")
        .await
        .into_data()
        .expect("must have payload");

    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Debian 9.5");
    assert_eq!(server.hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn concurrent_calls_do_not_share_retry_state() {
    let task_body = json!([{
        "action": "qmshutdown",
        "status": "OK",
        "startedAt": 1625251200000i64,
        "endedAt": null
    }]);
    let server = spawn_server(vec![
        (
            "/services/a/vps/tasks",
            vec![
                MockResponse::json(
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({"error": true, "message": "upstream down"}),
                )
                .with_rate_limit_reset(1),
                MockResponse::json(StatusCode::OK, json!([])),
            ],
        ),
        ("/services/b/vps/tasks", vec![MockResponse::json(StatusCode::OK, task_body)]),
    ])
    .await;
    let client = client_for(&server, fast_retry_options(2));

    let vps = client.vps();
    let (retried, direct) = tokio::join!(vps.get_tasks("a"), vps.get_tasks("b"));

    assert!(retried.is_success());
    let tasks = direct.into_data().expect("must have payload");
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].action, "qmshutdown");
    assert_eq!(server.hits.load(Ordering::SeqCst), 3);
}
