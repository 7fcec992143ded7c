//! End-to-end pipeline tests against a seeded `SQLite` file and a mocked
//! chat completions endpoint.

use std::sync::Arc;
use std::time::Duration;

use quarry_core::{AnswerReply, AnswerRequest};
use quarry_llm::{OpenAiCompatConfig, OpenAiCompatProvider, Provider};
use quarry_memory::{MemoryClient, SqliteMemory};
use quarry_pipeline::{ExecutorConfig, Pipeline, SqliteExecutor, Vault};
use rusqlite::Connection;
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn seed_database(dir: &tempfile::TempDir) -> String {
    let path = dir.path().join("enterprise_bi_db.sqlite");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE sales (
             sale_id INTEGER PRIMARY KEY,
             date TEXT,
             region_id INTEGER,
             region TEXT,
             revenue REAL,
             quantity INTEGER
         );
         INSERT INTO sales VALUES (1, '2026-02-03', 1, 'North', 1200.0, 4);
         INSERT INTO sales VALUES (2, '2026-02-10', 2, 'South', 800.5, 2);
         INSERT INTO sales VALUES (3, '2025-11-21', 1, 'North', 300.0, 1);
         CREATE TABLE inventory (product_id INTEGER, warehouse_location TEXT, quantity_on_hand INTEGER);
         INSERT INTO inventory VALUES (1, 'Austin', 10);
         INSERT INTO inventory VALUES (2, 'Austin', 5);
         INSERT INTO inventory VALUES (3, 'Denver', 7);",
    )
    .unwrap();
    path.to_str().unwrap().to_string()
}

fn executor(path: &str) -> Arc<SqliteExecutor> {
    Arc::new(SqliteExecutor::open(path, &ExecutorConfig::default()))
}

fn provider(server: &MockServer) -> Arc<dyn Provider> {
    Arc::new(
        OpenAiCompatProvider::new(OpenAiCompatConfig {
            provider: "groq".into(),
            model: "llama-3.3-70b-versatile".into(),
            base_url: server.uri(),
            api_key: "test-key".into(),
            temperature: 0.0,
            max_tokens: 256,
            timeout: Duration::from_secs(5),
        })
        .unwrap(),
    )
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "choices": [{"message": {"role": "assistant", "content": content}}]
    }))
}

fn ask(question: &str) -> AnswerRequest {
    AnswerRequest {
        tenant_id: "acme".into(),
        user_id: "analyst".into(),
        question: question.into(),
        history: vec!["show me last quarter".into()],
    }
}

#[tokio::test]
async fn generated_query_is_sanitized_and_summarized() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("metadata router"))
        .respond_with(completion(
            r#"{"corrected_question": "Show revenue by region for February 2026", "tables": ["sales", "regions"]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("enterprise BI expert"))
        .respond_with(completion(
            "```sql\nSELECT region, SUM(revenue) AS total_revenue FROM sales WHERE date LIKE '2026-02%' GROUP BY region ORDER BY region;\n```",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = Pipeline::builder(executor(&db))
        .provider(Some(provider(&server)))
        .build();
    let response = pipeline.answer(ask("feb 2026 revnu by regin")).await.unwrap();

    assert_eq!(
        response.query_text,
        "SELECT region, SUM(revenue) AS total_revenue FROM sales WHERE date LIKE '2026-02%' GROUP BY region ORDER BY region"
    );
    assert_eq!(response.records.len(), 2);
    assert_eq!(response.records[0]["region"], "North");
    assert_eq!(response.headline_label, "Total Revenue");
    assert!((response.headline_value - 2000.5).abs() < 1e-9);
    assert!(response.narrative.contains("\"Show revenue by region for February 2026\""));
    assert!(response.narrative.contains("modules: regions, sales."));
}

#[tokio::test]
async fn vault_hit_never_calls_backend() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(completion("SELECT 1"))
        .expect(0)
        .mount(&server)
        .await;

    let question = Vault::builtin()
        .entries()
        .iter()
        .find(|e| e.entities == ["inventory"])
        .map(|e| e.question.clone())
        .unwrap();

    let pipeline = Pipeline::builder(executor(&db))
        .provider(Some(provider(&server)))
        .build();
    let response = pipeline.answer(ask(&question.to_uppercase())).await.unwrap();

    assert!(response.query_text.contains("FROM inventory"));
    assert_eq!(response.records.len(), 2);
    assert_eq!(response.headline_label, "Total Inventory");
    assert!((response.headline_value - 22.0).abs() < f64::EPSILON);
    assert!(response.narrative.contains("modules: inventory."));
}

#[tokio::test]
async fn backend_outage_degrades_to_heuristic() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let pipeline = Pipeline::builder(executor(&db))
        .provider(Some(provider(&server)))
        .build();
    let response = pipeline.answer(ask("total sales")).await.unwrap();

    assert_eq!(response.query_text, "SELECT * FROM sales");
    assert_eq!(response.records.len(), 3);
    assert_eq!(response.headline_label, "Revenue");
    assert!((response.headline_value - 2300.5).abs() < 1e-9);
}

#[tokio::test]
async fn categorical_rows_fall_back_to_count() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("metadata router"))
        .respond_with(completion(r#"{"tables": ["inventory"]}"#))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_string_contains("enterprise BI expert"))
        .respond_with(completion("SELECT DISTINCT warehouse_location FROM inventory;"))
        .mount(&server)
        .await;

    let pipeline = Pipeline::builder(executor(&db))
        .provider(Some(provider(&server)))
        .build();
    let response = pipeline.answer(ask("which warehouses")).await.unwrap();

    assert_eq!(response.headline_label, "Total Records");
    assert!((response.headline_value - 2.0).abs() < f64::EPSILON);
}

#[tokio::test]
async fn execution_failure_becomes_failed_reply() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("enterprise BI expert"))
        .respond_with(completion("SELECT * FROM orders"))
        .mount(&server)
        .await;

    let pipeline = Pipeline::builder(executor(&db))
        .provider(Some(provider(&server)))
        .build();
    let reply = pipeline.reply(ask("list orders")).await;

    assert!(reply.is_failure());
    let AnswerReply::Failed(failure) = reply else {
        panic!("expected failure");
    };
    assert_eq!(failure.status, "failed");
    assert!(failure.error.contains("no such table: orders"));
}

#[tokio::test]
async fn answers_are_remembered_per_user() {
    let dir = tempfile::tempdir().unwrap();
    let db = seed_database(&dir);
    let memory = MemoryClient::new(Arc::new(SqliteMemory::in_memory().unwrap()), 5);

    let pipeline = Pipeline::builder(executor(&db))
        .memory(memory.clone())
        .build();
    let _ = pipeline.answer(ask("total revenue")).await.unwrap();

    let recalled = memory.recall("revenue", "analyst").await;
    assert_eq!(
        recalled,
        vec!["User Question: total revenue | AI Insight: Revenue was 2,300.50"]
    );
}
