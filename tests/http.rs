use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::time::sleep;

// -- Stub of the remote calculation service --

#[derive(Debug, Clone)]
struct StoredCalc {
    id: i64,
    user_id: String,
    calc_type: String,
    input_data: String,
    result: f64,
    interpretation: String,
    created_at: String,
}

#[derive(Default)]
struct StubState {
    records: Mutex<Vec<StoredCalc>>,
    next_id: AtomicI64,
    create_attempts: AtomicUsize,
    fail_creates: AtomicBool,
    omit_result: AtomicBool,
}

impl StubState {
    fn new() -> Arc<Self> {
        let state = Self::default();
        state.next_id.store(1, Ordering::SeqCst);
        Arc::new(state)
    }

    fn insert(
        &self,
        user_id: &str,
        calc_type: &str,
        input_data: String,
        result: f64,
        interpretation: &str,
    ) -> StoredCalc {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = StoredCalc {
            id,
            user_id: user_id.to_string(),
            calc_type: calc_type.to_string(),
            input_data,
            result,
            interpretation: interpretation.to_string(),
            created_at: format!("2026-08-01T10:00:{:02}", id % 60),
        };
        self.records.lock().unwrap().push(record.clone());
        record
    }
}

fn create_reply(stub: &StubState, record: &StoredCalc) -> (StatusCode, Json<Value>) {
    if stub.omit_result.load(Ordering::SeqCst) {
        return (StatusCode::OK, Json(json!({ "id": record.id })));
    }
    (
        StatusCode::OK,
        Json(json!({
            "id": record.id,
            "user_id": record.user_id,
            "calc_type": record.calc_type,
            "input_data": record.input_data,
            "result": record.result,
            "interpretation": record.interpretation,
            "created_at": record.created_at,
        })),
    )
}

fn reject_if_failing(stub: &StubState) -> Option<(StatusCode, Json<Value>)> {
    stub.create_attempts.fetch_add(1, Ordering::SeqCst);
    if stub.fail_creates.load(Ordering::SeqCst) {
        Some((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "stub exploded" })),
        ))
    } else {
        None
    }
}

async fn stub_create_imt(
    State(stub): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(reply) = reject_if_failing(&stub) {
        return reply;
    }
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    let weight = body["weight"].as_f64().unwrap_or_default();
    let height = body["height"].as_f64().unwrap_or_default();
    let bmi = weight / ((height / 100.0) * (height / 100.0));
    let record = stub.insert(
        &user_id,
        "imt",
        json!({ "weight": weight, "height": height }).to_string(),
        (bmi * 10.0).round() / 10.0,
        "stub interpretation",
    );
    create_reply(&stub, &record)
}

async fn stub_create_calories(
    State(stub): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(reply) = reject_if_failing(&stub) {
        return reply;
    }
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    let record = stub.insert(
        &user_id,
        "calories",
        body.to_string(),
        2000.0,
        "stub interpretation",
    );
    create_reply(&stub, &record)
}

async fn stub_create_pressure(
    State(stub): State<Arc<StubState>>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(reply) = reject_if_failing(&stub) {
        return reply;
    }
    let user_id = body["user_id"].as_str().unwrap_or_default().to_string();
    let systolic = body["systolic"].as_i64().unwrap_or_default();
    let diastolic = body["diastolic"].as_i64().unwrap_or_default();
    let record = stub.insert(
        &user_id,
        "blood_pressure",
        json!({ "systolic": systolic, "diastolic": diastolic }).to_string(),
        systolic as f64,
        "stub interpretation",
    );
    create_reply(&stub, &record)
}

#[derive(Debug, Deserialize)]
struct StubHistoryParams {
    user_id: String,
    limit: u64,
    offset: u64,
    calc_type: Option<String>,
}

async fn stub_history(
    State(stub): State<Arc<StubState>>,
    Query(params): Query<StubHistoryParams>,
) -> Json<Value> {
    let records = stub.records.lock().unwrap();
    let mut filtered: Vec<&StoredCalc> = records
        .iter()
        .filter(|r| r.user_id == params.user_id)
        .filter(|r| {
            params
                .calc_type
                .as_ref()
                .map(|t| &r.calc_type == t)
                .unwrap_or(true)
        })
        .collect();
    // Newest first, like the real service.
    filtered.sort_by(|a, b| b.id.cmp(&a.id));

    let total = filtered.len() as u64;
    let page: Vec<Value> = filtered
        .into_iter()
        .skip(params.offset as usize)
        .take(params.limit as usize)
        .map(|r| {
            json!({
                "id": r.id,
                "type": r.calc_type,
                "input_data": r.input_data,
                "result": r.result,
                "interpretation": r.interpretation,
                "created_at": r.created_at,
            })
        })
        .collect();

    Json(json!({
        "user_id": params.user_id,
        "total": total,
        "limit": params.limit,
        "offset": params.offset,
        "calculations": page,
    }))
}

#[derive(Debug, Deserialize)]
struct StubUserParams {
    user_id: String,
}

async fn stub_delete(
    State(stub): State<Arc<StubState>>,
    Path(id): Path<i64>,
    Query(params): Query<StubUserParams>,
) -> (StatusCode, Json<Value>) {
    let mut records = stub.records.lock().unwrap();
    let Some(index) = records.iter().position(|r| r.id == id) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Calculation not found" })),
        );
    };
    if records[index].user_id != params.user_id {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "detail": "No access to this calculation" })),
        );
    }
    records.remove(index);
    (
        StatusCode::OK,
        Json(json!({ "message": "Calculation deleted", "calculation_id": id })),
    )
}

async fn stub_stats(
    State(stub): State<Arc<StubState>>,
    Query(params): Query<StubUserParams>,
) -> Json<Value> {
    let records = stub.records.lock().unwrap();
    let mine: Vec<&StoredCalc> = records
        .iter()
        .filter(|r| r.user_id == params.user_id)
        .collect();
    let mut by_type = serde_json::Map::new();
    for record in &mine {
        let entry = by_type
            .entry(record.calc_type.clone())
            .or_insert_with(|| json!({ "count": 0, "avg": 0.0 }));
        entry["count"] = json!(entry["count"].as_u64().unwrap_or(0) + 1);
    }
    Json(json!({
        "user_id": params.user_id,
        "stats": { "total": mine.len(), "by_type": by_type },
    }))
}

async fn stub_health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": "2026-08-01T10:00:00",
        "service": "stub calculator",
    }))
}

fn stub_router(state: Arc<StubState>) -> Router {
    Router::new()
        .route("/health", get(stub_health))
        .route("/calculations/imt", post(stub_create_imt))
        .route("/calculations/calories", post(stub_create_calories))
        .route("/calculations/blood-pressure", post(stub_create_pressure))
        .route("/calculations/history", get(stub_history))
        .route("/calculations/stats", get(stub_stats))
        .route("/calculations/:id", delete(stub_delete))
        .with_state(state)
}

// -- Process management --

static CHILD_PIDS: Lazy<Mutex<Vec<i32>>> = Lazy::new(|| Mutex::new(Vec::new()));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;

    static REGISTER: Once = Once::new();

    pub fn register(pid: u32) {
        super::CHILD_PIDS.lock().unwrap().push(pid as i32);
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    extern "C" fn on_exit() {
        if let Ok(pids) = super::CHILD_PIDS.lock() {
            for pid in pids.iter() {
                unsafe {
                    libc::kill(*pid, libc::SIGTERM);
                }
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_identity_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "health_tracker_http_{}_{}.json",
        std::process::id(),
        nanos
    ));
    path.to_string_lossy().to_string()
}

struct TestEnv {
    base_url: String,
    stub: Arc<StubState>,
    child: Child,
    client: Client,
}

impl Drop for TestEnv {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl TestEnv {
    async fn start() -> TestEnv {
        let stub = StubState::new();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub");
        let stub_url = format!("http://{}", listener.local_addr().unwrap());
        let router = stub_router(Arc::clone(&stub));
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });

        let port = pick_free_port();
        let child = Command::new(env!("CARGO_BIN_EXE_health_tracker"))
            .env("PORT", port.to_string())
            .env("IDENTITY_PATH", unique_identity_path())
            .env("CALC_API_URL", &stub_url)
            .env("RUST_LOG", "info")
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .expect("failed to spawn server");

        #[cfg(unix)]
        cleanup::register(child.id());

        let env = TestEnv {
            base_url: format!("http://127.0.0.1:{port}"),
            stub,
            child,
            client: Client::new(),
        };
        env.wait_until_ready().await;
        env
    }

    async fn wait_until_ready(&self) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Ok(resp) = self
                .client
                .get(format!("{}/api/identity", self.base_url))
                .send()
                .await
            {
                if resp.status().is_success() {
                    return;
                }
            }
            if Instant::now() > deadline {
                panic!("server did not become ready");
            }
            sleep(Duration::from_millis(100)).await;
        }
    }

    async fn identity(&self) -> String {
        let body: Value = self
            .client
            .get(format!("{}/api/identity", self.base_url))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        body["user_id"].as_str().unwrap().to_string()
    }

    fn seed_imt_records(&self, user_id: &str, count: usize) {
        for _ in 0..count {
            self.stub.insert(
                user_id,
                "imt",
                r#"{"weight":70,"height":175}"#.to_string(),
                22.9,
                "seeded",
            );
        }
    }
}

// -- Tests --

#[tokio::test]
async fn bmi_calculation_persists_and_returns_reading() {
    let env = TestEnv::start().await;
    let user_id = env.identity().await;

    let body: Value = env
        .client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 70.0, "height": 175.0 }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["reading"]["value"], json!(22.9));
    assert_eq!(body["reading"]["category"], json!("Normal"));
    assert_eq!(body["reading"]["severity"], json!("success"));
    assert!(body["record_id"].as_i64().is_some());

    let records = env.stub.records.lock().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].calc_type, "imt");
    assert_eq!(records[0].user_id, user_id);
}

#[tokio::test]
async fn invalid_input_never_reaches_the_service() {
    let env = TestEnv::start().await;

    let response = env
        .client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 0.0, "height": 175.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    let message = response.text().await.unwrap();
    assert!(message.contains("weight"), "unexpected message: {message}");

    let response = env
        .client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 70.0, "height": -1.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    assert_eq!(env.stub.create_attempts.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn calories_use_the_exact_harris_benedict_formula() {
    let env = TestEnv::start().await;

    let body: Value = env
        .client
        .post(format!("{}/api/calc/calories", env.base_url))
        .json(&json!({
            "age": 25,
            "weight": 70.0,
            "height": 175.0,
            "gender": "m",
            "activity": 1.2,
        }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    let bmr = 88.362 + 13.397 * 70.0 + 4.799 * 175.0 - 5.677 * 25.0;
    let expected = (bmr * 1.2_f64).round() as i64;
    assert_eq!(body["reading"]["tdee_kcal"].as_i64(), Some(expected));
    assert_eq!(body["reading"]["severity"], json!("success"));
}

#[tokio::test]
async fn pressure_is_validated_then_classified() {
    let env = TestEnv::start().await;

    // Diastolic above systolic is a validation failure, not a category.
    let response = env
        .client
        .post(format!("{}/api/calc/blood-pressure", env.base_url))
        .json(&json!({ "systolic": 120, "diastolic": 125 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(env.stub.create_attempts.load(Ordering::SeqCst), 0);

    let body: Value = env
        .client
        .post(format!("{}/api/calc/blood-pressure", env.base_url))
        .json(&json!({ "systolic": 150, "diastolic": 95 }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["reading"]["category"], json!("Hypertension stage II"));
    assert_eq!(body["reading"]["severity"], json!("danger"));
}

#[tokio::test]
async fn history_pages_carry_the_button_window() {
    let env = TestEnv::start().await;
    let user_id = env.identity().await;
    env.seed_imt_records(&user_id, 47);

    let body: Value = env
        .client
        .get(format!("{}/api/history?offset=20", env.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["stale"], json!(false));
    assert_eq!(body["records"].as_array().unwrap().len(), 10);
    let pagination = &body["pagination"];
    assert_eq!(pagination["total"], json!(47));
    assert_eq!(pagination["page_count"], json!(5));
    assert_eq!(pagination["current_page"], json!(3));
    assert!(pagination["prev_enabled"].as_bool().unwrap());
    assert!(pagination["next_enabled"].as_bool().unwrap());

    let items = pagination["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    assert!(items.iter().all(|item| item["kind"] == json!("page")));
}

#[tokio::test]
async fn deleting_the_last_record_of_a_page_clamps_backwards() {
    let env = TestEnv::start().await;
    let user_id = env.identity().await;
    env.seed_imt_records(&user_id, 41);

    // Visit the last page (offset 40, one record on it).
    let body: Value = env
        .client
        .get(format!("{}/api/history?offset=40", env.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    let record_id = records[0]["id"].as_i64().unwrap();

    // Deleting it leaves 40 records; the view falls back to the previous
    // page instead of showing an empty one.
    let body: Value = env
        .client
        .delete(format!("{}/api/history/{record_id}", env.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["pagination"]["total"], json!(40));
    assert_eq!(body["pagination"]["offset"], json!(30));
    assert_eq!(body["pagination"]["current_page"], json!(4));
    assert_eq!(body["records"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn empty_history_is_not_an_error() {
    let env = TestEnv::start().await;

    let body: Value = env
        .client
        .get(format!("{}/api/history", env.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["records"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["page_count"], json!(0));
    assert_eq!(body["pagination"]["prev_enabled"], json!(false));
    assert_eq!(body["pagination"]["next_enabled"], json!(false));
}

#[tokio::test]
async fn upstream_failure_surfaces_as_bad_gateway() {
    let env = TestEnv::start().await;
    env.stub.fail_creates.store(true, Ordering::SeqCst);

    let response = env
        .client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 70.0, "height": 175.0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let message = response.text().await.unwrap();
    assert!(
        message.contains("stub exploded"),
        "detail not surfaced: {message}"
    );
}

#[tokio::test]
async fn missing_result_field_is_a_distinct_failure() {
    let env = TestEnv::start().await;
    env.stub.omit_result.store(true, Ordering::SeqCst);

    let response = env
        .client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 70.0, "height": 175.0 }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let message = response.text().await.unwrap();
    assert!(
        message.contains("missing 'result'"),
        "unexpected message: {message}"
    );
}

#[tokio::test]
async fn identity_reset_needs_confirmation_and_mints_a_new_token() {
    let env = TestEnv::start().await;
    let first = env.identity().await;
    assert!(!first.is_empty());

    // Identity is stable across calls.
    assert_eq!(env.identity().await, first);

    // No confirmation, no reset.
    let response = env
        .client
        .post(format!("{}/api/identity/reset", env.base_url))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(env.identity().await, first);

    let body: Value = env
        .client
        .post(format!("{}/api/identity/reset", env.base_url))
        .json(&json!({ "confirm": true }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();
    let second = body["user_id"].as_str().unwrap().to_string();
    assert_ne!(second, first);
    assert_eq!(env.identity().await, second);
}

#[tokio::test]
async fn logout_always_ends_with_a_valid_identity() {
    let env = TestEnv::start().await;
    let before = env.identity().await;

    let body: Value = env
        .client
        .post(format!("{}/api/identity/logout", env.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    let after = body["user_id"].as_str().unwrap().to_string();
    assert!(!after.is_empty());
    assert_ne!(after, before);
    assert_eq!(env.identity().await, after);
}

#[tokio::test]
async fn trends_reshape_saved_history() {
    let env = TestEnv::start().await;

    for (systolic, diastolic) in [(119, 79), (135, 85)] {
        env.client
            .post(format!("{}/api/calc/blood-pressure", env.base_url))
            .json(&json!({ "systolic": systolic, "diastolic": diastolic }))
            .send()
            .await
            .unwrap()
            .error_for_status()
            .unwrap();
    }
    env.client
        .post(format!("{}/api/calc/imt", env.base_url))
        .json(&json!({ "weight": 70.0, "height": 175.0 }))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap();

    let body: Value = env
        .client
        .get(format!("{}/api/trends", env.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["bmi"].as_array().unwrap().len(), 1);
    let pressure = body["pressure"].as_array().unwrap();
    assert_eq!(pressure.len(), 2);
    // Oldest first.
    assert_eq!(pressure[0]["systolic"], json!(119.0));
    assert_eq!(pressure[1]["systolic"], json!(135.0));
}

#[tokio::test]
async fn health_reports_upstream_and_identity() {
    let env = TestEnv::start().await;

    let body: Value = env
        .client
        .get(format!("{}/api/health", env.base_url))
        .send()
        .await
        .unwrap()
        .error_for_status()
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["identity_present"], json!(true));
    assert_eq!(body["upstream"]["status"], json!("healthy"));
}

#[tokio::test]
async fn history_filter_is_passed_through() {
    let env = TestEnv::start().await;
    let user_id = env.identity().await;
    env.seed_imt_records(&user_id, 3);
    env.stub.insert(
        &user_id,
        "calories",
        "{}".to_string(),
        2000.0,
        "seeded",
    );

    let body: Value = env
        .client
        .get(format!(
            "{}/api/history?offset=0&calc_type=calories",
            env.base_url
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let records = body["records"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["calc_type"], json!("calories"));
    assert_eq!(body["pagination"]["total"], json!(1));
}
