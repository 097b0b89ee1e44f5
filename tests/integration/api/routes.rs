//! Handler-level tests for the core routes.

use actix_web::{test, App};
use serde_json::Value;

use lumenscope::api::configure_routes;

use crate::integration::common::{test_config, test_state, ACCOUNT_ID, CONTRACT_ID, TX_HASH};

macro_rules! test_app {
	($state:expr) => {
		test::init_service(
			App::new()
				.app_data($state.clone())
				.configure(configure_routes),
		)
		.await
	};
}

#[actix_web::test]
async fn test_health_reports_ok() {
	let state = test_state(test_config(
		"https://horizon.example",
		"https://horizon-testnet.example",
		"https://soroban.example",
		"https://expert.example",
	));
	let app = test_app!(state);

	let req = test::TestRequest::get().uri("/api/health").to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["status"], "OK");
	assert_eq!(body["stellar_horizon"], "https://horizon.example");
	assert!(body["timestamp"].is_string());
	assert!(body["uptime"].as_f64().unwrap() >= 0.0);
}

#[actix_web::test]
async fn test_unmatched_route_returns_structured_404() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get().uri("/api/nothing").to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 404);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["message"], "Route not found");
	assert_eq!(body["path"], "/api/nothing");
	assert_eq!(body["method"], "GET");
}

#[actix_web::test]
async fn test_search_classifies_each_shape() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/search/{}", ACCOUNT_ID))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["type"], "account");
	assert_eq!(body["id"], ACCOUNT_ID);

	let req = test::TestRequest::get()
		.uri(&format!("/api/search/{}", CONTRACT_ID))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["type"], "contract");
	assert_eq!(body["contractId"], CONTRACT_ID);

	let req = test::TestRequest::get()
		.uri(&format!("/api/search/{}", TX_HASH))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["type"], "transaction");
	assert_eq!(body["hash"], TX_HASH);

	let req = test::TestRequest::get()
		.uri("/api/search/123456")
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["type"], "ledger");
	assert_eq!(body["sequence"], "123456");
}

#[actix_web::test]
async fn test_search_unknown_shape_returns_404_with_hints() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/search/not-an-identifier")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 404);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["provided"], "not-an-identifier");
	assert!(body["suggestions"].is_array());
}

#[actix_web::test]
async fn test_invalid_transaction_hash_rejected_before_network() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/transactions/xyz")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 400);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["provided"], "xyz");
	assert_eq!(body["expected"], "64 hexadecimal characters");
}

#[actix_web::test]
async fn test_invalid_account_id_rejected() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/accounts/XSHORT")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_invalid_ledger_sequence_rejected() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	for bad in ["abc", "0", "-5"] {
		let req = test::TestRequest::get()
			.uri(&format!("/api/ledgers/{}", bad))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), 400, "sequence {:?} should be rejected", bad);
	}
}

#[actix_web::test]
async fn test_ledger_listing_normalizes_sparse_records() {
	let mut horizon = mockito::Server::new_async().await;
	let _mock = horizon
		.mock("GET", "/ledgers?order=desc&limit=2")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"_embedded": {"records": [
				{"sequence": 101, "hash": "aa"},
				{"sequence": 100}
			]}}"#,
		)
		.create_async()
		.await;

	let state = test_state(test_config(&horizon.url(), "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/ledgers?limit=2")
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	let records = body.as_array().unwrap();
	assert_eq!(records.len(), 2);
	assert_eq!(records[0]["sequence"], 101);
	assert_eq!(records[0]["hash"], "aa");
	assert_eq!(records[0]["transaction_count"], 0);
	assert_eq!(records[0]["total_coins"], "0");
	assert_eq!(records[0]["base_fee_in_stroops"], 100);
	assert_eq!(records[1]["hash"], "");
	assert!(records[1]["closed_at"].as_str().unwrap().contains('T'));
}

#[actix_web::test]
async fn test_limit_above_cap_is_clamped() {
	let mut horizon = mockito::Server::new_async().await;
	let _mock = horizon
		.mock("GET", "/ledgers?order=desc&limit=200")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(r#"{"_embedded": {"records": []}}"#)
		.expect(1)
		.create_async()
		.await;

	let state = test_state(test_config(&horizon.url(), "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/ledgers?limit=9999")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 200);
	_mock.assert_async().await;
}

#[actix_web::test]
async fn test_transaction_lookup_falls_back_to_testnet() {
	let mut mainnet = mockito::Server::new_async().await;
	let mut testnet = mockito::Server::new_async().await;

	let path = format!("/transactions/{}", TX_HASH);
	let _main = mainnet
		.mock("GET", path.as_str())
		.with_status(404)
		.with_body(r#"{"status": 404}"#)
		.create_async()
		.await;
	let _test = testnet
		.mock("GET", path.as_str())
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			r#"{{"hash": "{}", "source_account": "{}", "fee_charged": "100"}}"#,
			TX_HASH, ACCOUNT_ID
		))
		.create_async()
		.await;

	let state = test_state(test_config(&mainnet.url(), &testnet.url(), "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/transactions/{}", TX_HASH))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["_source"], "testnet");
	assert_eq!(body["hash"], TX_HASH);
	assert_eq!(body["id"], TX_HASH);
	assert_eq!(body["successful"], true);
	assert_eq!(body["fee_account"], ACCOUNT_ID);
}

#[actix_web::test]
async fn test_transaction_missing_everywhere_returns_404_with_suggestions() {
	let mut mainnet = mockito::Server::new_async().await;
	let mut testnet = mockito::Server::new_async().await;

	let path = format!("/transactions/{}", TX_HASH);
	let _main = mainnet
		.mock("GET", path.as_str())
		.with_status(404)
		.create_async()
		.await;
	let _test = testnet
		.mock("GET", path.as_str())
		.with_status(404)
		.create_async()
		.await;

	let state = test_state(test_config(&mainnet.url(), &testnet.url(), "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/transactions/{}", TX_HASH))
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 404);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["hash"], TX_HASH);
	assert!(body["suggestions"].is_array());
}

#[actix_web::test]
async fn test_account_not_found_carries_account_id() {
	let mut horizon = mockito::Server::new_async().await;
	let _mock = horizon
		.mock("GET", format!("/accounts/{}", ACCOUNT_ID).as_str())
		.with_status(404)
		.create_async()
		.await;

	let state = test_state(test_config(&horizon.url(), "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/accounts/{}", ACCOUNT_ID))
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 404);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["account_id"], ACCOUNT_ID);
}

#[actix_web::test]
async fn test_network_stats_aggregates_both_fetches() {
	let mut horizon = mockito::Server::new_async().await;
	let _ledgers = horizon
		.mock("GET", "/ledgers?order=desc&limit=50")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"_embedded": {"records": [
				{"sequence": 110, "transaction_count": 10, "operation_count": 20, "closed_at": "2024-01-01T00:01:00Z"},
				{"sequence": 109, "transaction_count": 10, "operation_count": 20, "closed_at": "2024-01-01T00:00:55Z"},
				{"sequence": 108, "transaction_count": 10, "operation_count": 20, "closed_at": "2024-01-01T00:00:50Z"},
				{"sequence": 107, "transaction_count": 10, "operation_count": 20, "closed_at": "2024-01-01T00:00:45Z"},
				{"sequence": 106, "transaction_count": 10, "operation_count": 20, "closed_at": "2024-01-01T00:00:40Z"}
			]}}"#,
		)
		.create_async()
		.await;
	let _txs = horizon
		.mock("GET", "/transactions?order=desc&limit=200")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"_embedded": {"records": [
				{"hash": "t1", "fee_charged": "200", "source_account": "GA"},
				{"hash": "t2", "fee_charged": "400", "source_account": "GB"}
			]}}"#,
		)
		.create_async()
		.await;

	let state = test_state(test_config(&horizon.url(), "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/network-stats")
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["latestLedger"]["sequence"], 110);
	assert!(body["networkStats"]["transactionsPerSecond"].is_string());
	assert!(body["networkStats"]["networkLiveness"].is_string());
	assert_eq!(body["networkStats"]["transactionsAnalyzed"], 2);
	assert_eq!(body["recentTransactions"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn test_network_stats_upstream_failure_is_500() {
	let mut horizon = mockito::Server::new_async().await;
	let _mock = horizon
		.mock("GET", "/ledgers?order=desc&limit=50")
		.with_status(500)
		.create_async()
		.await;
	let _txs = horizon
		.mock("GET", "/transactions?order=desc&limit=200")
		.with_status(500)
		.create_async()
		.await;

	let state = test_state(test_config(&horizon.url(), "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/network-stats")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 500);

	let body: Value = test::read_body_json(resp).await;
	assert!(body["message"].is_string());
}

#[actix_web::test]
async fn test_projects_listing_filters_on_index_html() {
	let temp_dir = tempfile::TempDir::new().unwrap();
	let published = temp_dir.path().join("live-site");
	let draft = temp_dir.path().join("draft");
	std::fs::create_dir(&published).unwrap();
	std::fs::create_dir(&draft).unwrap();
	std::fs::write(published.join("index.html"), "<html></html>").unwrap();

	let mut config = test_config("http://h", "http://ht", "http://s", "http://e");
	config.projects_root = temp_dir.path().to_string_lossy().into_owned();
	let state = test_state(config);
	let app = test_app!(state);

	let req = test::TestRequest::get().uri("/api/projects").to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["projects"], serde_json::json!(["live-site"]));
	assert!(body["warning"].is_null());

	let req = test::TestRequest::get()
		.uri("/api/projects?all=true")
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;
	assert_eq!(body["projects"], serde_json::json!(["draft", "live-site"]));
}

#[actix_web::test]
async fn test_projects_missing_root_warns_instead_of_failing() {
	let mut config = test_config("http://h", "http://ht", "http://s", "http://e");
	config.projects_root = "/definitely/not/here".to_string();
	let state = test_state(config);
	let app = test_app!(state);

	let req = test::TestRequest::get().uri("/api/projects").to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 200);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["projects"], serde_json::json!([]));
	assert!(body["warning"].is_string());
}
