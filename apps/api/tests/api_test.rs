//! End-to-end tests for the storefront API.
//!
//! Each test builds the full router (routes, error-log middleware, trace
//! layer) over a fresh in-memory database and drives it with `oneshot`.
//! The onboarding worker is not spawned; tests call `jobs::drain` to run
//! queued jobs deterministically.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt; // For oneshot()

use chrono::Utc;
use fh_api::auth::hash_secret;
use fh_api::config::ApiConfig;
use fh_api::sms::{SmsError, SmsGateway, SmsResult};
use fh_api::{build_router, jobs, AppState};
use fh_core::{JobStatus, User, STANDARD_SELLING_PRICE_LIST};
use fh_db::repository::item::new_item;
use fh_db::{Database, DbConfig};

// =============================================================================
// Harness
// =============================================================================

/// Records every message; optionally fails instead.
#[derive(Default)]
struct RecordingSms {
    sent: Mutex<Vec<(String, String)>>,
    fail: AtomicBool,
}

impl RecordingSms {
    fn messages_to(&self, mobile: &str) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == mobile)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn last_to(&self, mobile: &str) -> String {
        self.messages_to(mobile).pop().expect("no SMS sent to mobile")
    }
}

#[async_trait]
impl SmsGateway for RecordingSms {
    async fn send(&self, mobile: &str, message: &str) -> SmsResult<()> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(SmsError::Rejected {
                status: 503,
                body: "gateway down".to_string(),
            });
        }
        self.sent
            .lock()
            .unwrap()
            .push((mobile.to_string(), message.to_string()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

struct TestApp {
    db: Database,
    sms: Arc<RecordingSms>,
    router: Router,
}

impl TestApp {
    async fn new() -> Self {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sms = Arc::new(RecordingSms::default());
        let config = ApiConfig::from_lookup(|key: &str| match key {
            "FH_BASE_URL" => Some("https://shop.example.com/".to_string()),
            _ => None,
        })
        .unwrap();

        let state = Arc::new(AppState::new(db.clone(), sms.clone(), config));
        let router = build_router(state);

        TestApp { db, sms, router }
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("authorization", token);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn run_jobs(&self) -> usize {
        jobs::drain(&self.db, self.sms.as_ref()).await
    }

    /// Registers, onboards and logs in a customer. Returns the token header.
    async fn customer(&self, mobile: &str, email: &str, name: &str) -> String {
        let (status, _) = self
            .post(
                "/api/customers/register",
                None,
                json!({"mobile_number": mobile, "email_address": email, "full_name": name}),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        self.run_jobs().await;

        let (status, body) = self
            .post(
                "/api/password/recover",
                None,
                json!({"usr": email, "new_password": "secret-1"}),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");

        self.login(email, "secret-1").await
    }

    async fn login(&self, usr: &str, pwd: &str) -> String {
        let (status, body) = self
            .post("/api/login", None, json!({"usr": usr, "pwd": pwd}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success_key"], 1, "{body}");
        format!(
            "token {}:{}",
            body["api_key"].as_str().unwrap(),
            body["api_secret"].as_str().unwrap()
        )
    }

    async fn seed_item(&self, code: &str, name: &str, rate_cents: Option<i64>) {
        self.db.items().upsert(&new_item(code, name)).await.unwrap();
        if let Some(cents) = rate_cents {
            self.db
                .items()
                .set_selling_rate(code, STANDARD_SELLING_PRICE_LIST, cents)
                .await
                .unwrap();
        }
    }
}

// =============================================================================
// Catalog and Settings
// =============================================================================

#[tokio::test]
async fn test_products_list_prices_in_major_units() {
    let app = TestApp::new().await;
    app.seed_item("MILK-500", "Milk 500ml", Some(6550)).await;
    app.seed_item("EGGS-12", "Eggs (tray of 12)", None).await;

    let (status, body) = app.get("/api/products", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);
    let products = body["products"].as_array().unwrap();
    assert_eq!(products.len(), 2);
    // ordered by item_code
    assert_eq!(products[0]["product_id"], "EGGS-12");
    assert_eq!(products[0]["selling_price"], 0.0);
    assert_eq!(products[1]["product_name"], "Milk 500ml");
    assert_eq!(products[1]["selling_price"], 65.5);
}

#[tokio::test]
async fn test_default_currency() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/currency", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["currency"], "KES");
    assert_eq!(body["message"], "Currency returned successfully.");

    app.db.settings().delete("default_currency").await.unwrap();
    let (status, body) = app.get("/api/currency", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], true);
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_registration_creates_accounts_and_sends_credentials() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            json!({
                "mobile_number": "+254700000001",
                "email_address": "Jane@Example.com",
                "full_name": "Jane Wanjiru Mary Doe"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], 200);

    assert_eq!(app.run_jobs().await, 1);

    let customer = app
        .db
        .customers()
        .get_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(customer.mobile_no, "254700000001");
    assert_eq!(customer.first_name, "Jane");
    assert_eq!(customer.middle_name.as_deref(), Some("Wanjiru"));
    assert_eq!(customer.last_name.as_deref(), Some("Doe"));

    // the texted password logs in
    let welcome = app.sms.last_to("254700000001");
    let password = welcome
        .trim_end_matches('.')
        .rsplit(' ')
        .next()
        .unwrap()
        .to_string();
    assert_eq!(password.len(), 4);
    assert!(password.chars().all(|c| c.is_ascii_digit()));
    app.login("254700000001", &password).await;
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let app = TestApp::new().await;
    let first = json!({
        "mobile_number": "254700000001",
        "email_address": "jane@example.com",
        "full_name": "Jane Doe"
    });

    let (status, _) = app.post("/api/customers/register", None, first.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // same pair again before the worker ran: the queued job's key is taken
    let (status, body) = app.post("/api/customers/register", None, first).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_REGISTERED");

    app.run_jobs().await;

    // same email, different mobile
    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            json!({
                "mobile_number": "254700000099",
                "email_address": "JANE@example.com",
                "full_name": "Jane Again"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // same mobile (with "+"), different email
    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            json!({
                "mobile_number": "+254700000001",
                "email_address": "other@example.com",
                "full_name": "Other Person"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(app.run_jobs().await, 0);
    assert_eq!(app.db.customers().count().await.unwrap(), 1);
    assert_eq!(app.db.users().count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_registration_sharing_a_queued_contact_is_rejected() {
    let app = TestApp::new().await;
    let register = |mobile: &str, email: &str| {
        json!({"mobile_number": mobile, "email_address": email, "full_name": "Jane Doe"})
    };

    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            register("254700000001", "a@example.com"),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    // worker has not run: only the queue knows about the first request
    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            register("+254700000001", "b@example.com"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_REGISTERED");

    let (status, _) = app
        .post(
            "/api/customers/register",
            None,
            register("254700000002", "A@example.com"),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    assert_eq!(app.run_jobs().await, 1);
    assert_eq!(app.db.customers().count().await.unwrap(), 1);
    assert_eq!(
        app.db.jobs().count_by_status(JobStatus::Failed).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_registration_requires_all_fields() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/customers/register",
            None,
            json!({"mobile_number": "254700000001", "full_name": "Jane Doe"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(app.run_jobs().await, 0);
}

// =============================================================================
// OTP
// =============================================================================

#[tokio::test]
async fn test_otp_for_unknown_mobile() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/otp/generate", None, json!({"mobile_number": "+254711111111"}))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with this mobile number does not exist.");
    assert_eq!(app.db.otps().count_for("254711111111").await.unwrap(), 0);
    assert!(app.sms.messages_to("254711111111").is_empty());
}

#[tokio::test]
async fn test_otp_generate_replaces_and_validate_does_not_consume() {
    let app = TestApp::new().await;
    app.customer("254700000001", "jane@example.com", "Jane Doe").await;

    for _ in 0..2 {
        let (status, body) = app
            .post("/api/otp/generate", None, json!({"mobile_number": "+254700000001"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OTP sent successfully.");
    }
    assert_eq!(app.db.otps().count_for("254700000001").await.unwrap(), 1);

    let sms = app.sms.last_to("254700000001");
    let otp: String = sms.chars().filter(|c| c.is_ascii_digit()).collect();
    assert_eq!(otp.len(), 6);

    let uri = format!("/api/otp/validate?mobile_number=%2B254700000001&otp={otp}");
    for _ in 0..2 {
        let (status, body) = app.get(&uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], 1);
    }

    let wrong = if otp == "000000" { "111111" } else { "000000" };
    let (_, body) = app
        .get(
            &format!("/api/otp/validate?mobile_number=254700000001&otp={wrong}"),
            None,
        )
        .await;
    assert_eq!(body["message"], 0);

    let (status, body) = app
        .get("/api/otp/validate?mobile_number=abc&otp=123456", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], 0);

    let (status, _) = app
        .get("/api/otp/validate?mobile_number=254700000001", None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_otp_gateway_failure_is_bad_gateway() {
    let app = TestApp::new().await;
    app.customer("254700000001", "jane@example.com", "Jane Doe").await;
    app.sms.fail.store(true, Ordering::SeqCst);

    let (status, body) = app
        .post("/api/otp/generate", None, json!({"mobile_number": "254700000001"}))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "GATEWAY_ERROR");
    assert_eq!(app.db.otps().count_for("254700000001").await.unwrap(), 1);
}

// =============================================================================
// Login and Password Recovery
// =============================================================================

#[tokio::test]
async fn test_login_failure_is_uniform() {
    let app = TestApp::new().await;
    app.customer("254700000001", "jane@example.com", "Jane Doe").await;

    for body in [
        json!({"usr": "jane@example.com", "pwd": "wrong"}),
        json!({"usr": "nobody@example.com", "pwd": "secret-1"}),
        json!({"usr": "jane@example.com"}),
    ] {
        let (status, body) = app.post("/api/login", None, body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"success_key": 0, "message": "Authentication Error!"})
        );
    }
}

#[tokio::test]
async fn test_login_keeps_api_key_and_rotates_secret() {
    let app = TestApp::new().await;
    let first = app
        .customer("254700000001", "jane@example.com", "Jane Doe")
        .await;

    let (status, body) = app
        .post("/api/login", None, json!({"usr": "+254700000001", "pwd": "secret-1"}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Authentication success");
    assert_eq!(body["username"], "Jane Doe");
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["base_url"], "https://shop.example.com");
    assert_eq!(body["sid"].as_str().unwrap().len(), 56);

    let second = format!(
        "token {}:{}",
        body["api_key"].as_str().unwrap(),
        body["api_secret"].as_str().unwrap()
    );
    let key = |token: &str| token.split(':').next().unwrap().to_string();
    assert_eq!(key(&first), key(&second));

    let (status, _) = app.get("/api/orders", Some(&first)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/orders", Some(&second)).await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(
        app.db.sessions().count_for_user("jane@example.com").await.unwrap(),
        2
    );
}

#[tokio::test]
async fn test_password_recovery_unknown_user() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/password/recover",
            None,
            json!({"usr": "ghost@example.com", "new_password": "x1"}),
        )
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], 404);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_orders_require_token() {
    let app = TestApp::new().await;

    let (status, _) = app.get("/api/orders", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/api/orders", Some("token nope:nope")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_order_with_unpriced_line_writes_nothing() {
    let app = TestApp::new().await;
    let token = app
        .customer("254700000001", "jane@example.com", "Jane Doe")
        .await;
    app.seed_item("MILK-500", "Milk 500ml", Some(6500)).await;
    app.seed_item("EGGS-12", "Eggs", None).await;

    let (status, body) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({"sales_order_items": [
                {"item_code": "MILK-500", "qty": 2},
                {"item_code": "EGGS-12", "qty": 1}
            ]}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("EGGS-12"));

    let customer = app
        .db
        .customers()
        .get_by_email("jane@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        app.db.sales_orders().count_for_customer(&customer.name).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn test_order_history_groups_lines_per_order() {
    let app = TestApp::new().await;
    let token = app
        .customer("254700000001", "jane@example.com", "Jane Doe")
        .await;
    app.seed_item("MILK-500", "Milk 500ml", Some(6500)).await;
    app.seed_item("EGGS-12", "Eggs", Some(42000)).await;
    app.seed_item("BREAD-400", "Bread", Some(6000)).await;

    let (status, first) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({
                "sales_order_items": [
                    {"item_code": "MILK-500", "qty": 2},
                    {"item_code": "EGGS-12", "qty": 1}
                ],
                "delivery_date": "2026-11-02",
                "logged_in_user": "jane@example.com"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert_eq!(first["sales_order"]["grand_total"], 550.0);
    assert_eq!(first["sales_order"]["status"], "draft");

    let (status, _) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({"sales_order_items": [{"item_code": "BREAD-400", "qty": 3}]}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .get("/api/orders?logged_in_user=jane@example.com", Some(&token))
        .await;
    assert_eq!(status, StatusCode::OK);

    let orders = body["sales_orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);

    let first_name = first["sales_order"]["name"].as_str().unwrap();
    let first_view = orders
        .iter()
        .find(|o| o["sales_order_name"] == first_name)
        .unwrap();
    assert_eq!(first_view["items"].as_array().unwrap().len(), 2);
    assert_eq!(first_view["delivery_date"], "02-11-2026");
    assert_eq!(first_view["items"][0]["amount"], 130.0);
    assert_eq!(first_view["items"][0]["image"], "");

    let second_view = orders
        .iter()
        .find(|o| o["sales_order_name"] != first_name)
        .unwrap();
    assert_eq!(second_view["items"].as_array().unwrap().len(), 1);
    assert_eq!(second_view["delivery_date"], "");
    assert_eq!(second_view["grand_total"], 180.0);
}

#[tokio::test]
async fn test_replace_and_submit_draft() {
    let app = TestApp::new().await;
    let token = app
        .customer("254700000001", "jane@example.com", "Jane Doe")
        .await;
    app.seed_item("MILK-500", "Milk 500ml", Some(6500)).await;
    app.seed_item("BREAD-400", "Bread", Some(6000)).await;

    let (_, created) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({
                "sales_order_items": [{"item_code": "MILK-500", "qty": 2}],
                "delivery_date": "2026-11-02"
            }),
        )
        .await;
    let name = created["sales_order"]["name"].as_str().unwrap().to_string();
    assert!(name.starts_with("SAL-ORD-"));

    // full overwrite: lines and delivery date
    let (status, updated) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({
                "sales_order_name": name,
                "sales_order_items": [{"item_code": "BREAD-400", "qty": 1}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["sales_order"]["name"], name.as_str());
    assert_eq!(updated["sales_order"]["grand_total"], 60.0);
    assert_eq!(updated["sales_order"]["delivery_date"], "");

    let items = app.db.sales_orders().get_items(&name).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].item_code, "BREAD-400");

    let submit_uri = format!("/api/orders/{name}/submit");
    let (status, _) = app.post(&submit_uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.post(&submit_uri, Some(&token), json!({})).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post(
            "/api/orders",
            Some(&token),
            json!({
                "sales_order_name": name,
                "sales_order_items": [{"item_code": "MILK-500", "qty": 1}]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .post("/api/orders/SAL-ORD-2026-99999/submit", Some(&token), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_orders_are_private_to_their_customer() {
    let app = TestApp::new().await;
    let jane = app
        .customer("254700000001", "jane@example.com", "Jane Doe")
        .await;
    let john = app
        .customer("254700000002", "john@example.com", "John Doe")
        .await;
    app.seed_item("MILK-500", "Milk 500ml", Some(6500)).await;

    let (_, created) = app
        .post(
            "/api/orders",
            Some(&jane),
            json!({"sales_order_items": [{"item_code": "MILK-500", "qty": 1}]}),
        )
        .await;
    let name = created["sales_order"]["name"].as_str().unwrap().to_string();

    // claiming to be someone else
    let (status, _) = app
        .get("/api/orders?logged_in_user=jane@example.com", Some(&john))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // someone else's order looks missing
    let (status, _) = app
        .post(&format!("/api/orders/{name}/submit"), Some(&john), json!({}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = app.get("/api/orders", Some(&john)).await;
    assert!(body["sales_orders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_user_without_customer_profile() {
    let app = TestApp::new().await;
    let now = Utc::now();
    app.db
        .users()
        .insert(&User {
            email: "staff@example.com".to_string(),
            full_name: "Store Staff".to_string(),
            mobile_no: "254700000777".to_string(),
            password_hash: hash_secret("staff-pw").unwrap(),
            api_key: None,
            api_secret_hash: None,
            enabled: true,
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();
    let token = app.login("staff@example.com", "staff-pw").await;

    let (status, body) = app.get("/api/orders", Some(&token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("not linked to a customer"));
}

// =============================================================================
// Error Log
// =============================================================================

#[tokio::test]
async fn test_failures_are_logged() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/otp/generate", None, json!({"mobile_number": "254799999999"}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get("/api/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = app.db.error_logs().recent(10).await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].method, "POST /api/otp/generate");
    assert_eq!(entries[0].status, 404);
    assert_eq!(entries[0].message, "User with this mobile number does not exist.");
}
