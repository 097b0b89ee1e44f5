//! Contract summary and event endpoint tests.

use actix_web::{test, App};
use mockito::Matcher;
use serde_json::{json, Value};
use stellar_xdr::curr::{
	ContractDataDurability, ContractDataEntry, ContractExecutable, ExtensionPoint, Hash,
	LedgerEntryData, Limits, ScAddress, ScContractInstance, ScVal, WriteXdr,
};

use lumenscope::api::configure_routes;

use crate::integration::common::{test_config, test_state, CONTRACT_ID};

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

/// Base64 XDR of an asset-backed contract instance entry.
fn asset_instance_xdr() -> String {
	let contract = stellar_strkey::Contract::from_string(CONTRACT_ID).unwrap();
	let entry = LedgerEntryData::ContractData(ContractDataEntry {
		ext: ExtensionPoint::V0,
		contract: ScAddress::Contract(Hash(contract.0)),
		key: ScVal::LedgerKeyContractInstance,
		durability: ContractDataDurability::Persistent,
		val: ScVal::ContractInstance(ScContractInstance {
			executable: ContractExecutable::StellarAsset,
			storage: None,
		}),
	});
	entry.to_xdr_base64(Limits::none()).unwrap()
}

#[actix_web::test]
async fn test_invalid_contract_id_rejected() {
	let state = test_state(test_config("http://h", "http://ht", "http://s", "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri("/api/contracts/not-a-contract")
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 400);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["provided"], "not-a-contract");
}

#[actix_web::test]
async fn test_asset_contract_summary_from_rpc() {
	let mut soroban = mockito::Server::new_async().await;
	let mut expert = mockito::Server::new_async().await;

	let _health = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getHealth"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"jsonrpc": "2.0", "id": 1, "result": {
				"status": "healthy",
				"latestLedger": 2000,
				"oldestLedger": 1000,
				"ledgerRetentionWindow": 1001
			}}"#,
		)
		.create_async()
		.await;

	let _entries = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getLedgerEntries"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			r#"{{"jsonrpc": "2.0", "id": 1, "result": {{
				"entries": [{{"key": "irrelevant", "xdr": "{}", "lastModifiedLedgerSeq": 1500}}],
				"latestLedger": 2000
			}}}}"#,
			asset_instance_xdr()
		))
		.create_async()
		.await;

	// Indexer enrichment is opportunistic; an unknown contract must not fail
	let _expert = expert
		.mock("GET", format!("/testnet/contract/{}", CONTRACT_ID).as_str())
		.with_status(404)
		.create_async()
		.await;

	let state = test_state(test_config("http://h", "http://ht", &soroban.url(), &expert.url()));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/contracts/{}?network=testnet", CONTRACT_ID))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["contractId"], CONTRACT_ID);
	assert_eq!(body["network"], "testnet");
	assert_eq!(body["executableType"], "asset");
	assert_eq!(body["source"], "soroban-rpc");
	assert_eq!(body["latestLedger"], 2000);
	assert_eq!(body["oldestLedger"], 1000);
	assert_eq!(body["lastModifiedLedger"], 1500);
	assert_eq!(body["storageCount"], 0);
}

#[actix_web::test]
async fn test_rpc_failure_falls_back_to_indexer() {
	let mut soroban = mockito::Server::new_async().await;
	let mut expert = mockito::Server::new_async().await;

	let _rpc = soroban
		.mock("POST", "/")
		.with_status(500)
		.create_async()
		.await;

	let _expert = expert
		.mock("GET", format!("/public/contract/{}", CONTRACT_ID).as_str())
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			r#"{{"contract": "{}", "created": 1700000000, "creator": "GCREATOR",
				"wasm": "deadbeef", "storage_entries": 3, "invocations": 42,
				"subinvocations": 7, "events": 5, "errors": 1,
				"validation": {{"status": "verified"}}}}"#,
			CONTRACT_ID
		))
		.create_async()
		.await;

	let state = test_state(test_config("http://h", "http://ht", &soroban.url(), &expert.url()));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/contracts/{}", CONTRACT_ID))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["source"], "stellar-expert");
	assert!(body["warning"].is_string());
	assert_eq!(body["creator"], "GCREATOR");
	assert_eq!(body["invocations"], 42);
	assert_eq!(body["eventsCount"], 5);
	assert_eq!(body["validationStatus"], "verified");
}

#[actix_web::test]
async fn test_contract_unknown_everywhere_is_404() {
	let mut soroban = mockito::Server::new_async().await;
	let mut expert = mockito::Server::new_async().await;

	let _health = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getHealth"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"jsonrpc": "2.0", "id": 1, "result": {
				"status": "healthy", "latestLedger": 10, "oldestLedger": 1,
				"ledgerRetentionWindow": 10
			}}"#,
		)
		.create_async()
		.await;

	let _entries = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getLedgerEntries"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(r#"{"jsonrpc": "2.0", "id": 1, "result": {"entries": [], "latestLedger": 10}}"#)
		.create_async()
		.await;

	let _expert = expert
		.mock("GET", format!("/public/contract/{}", CONTRACT_ID).as_str())
		.with_status(404)
		.create_async()
		.await;

	let state = test_state(test_config("http://h", "http://ht", &soroban.url(), &expert.url()));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/contracts/{}", CONTRACT_ID))
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 404);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["contractId"], CONTRACT_ID);
}

#[actix_web::test]
async fn test_events_degrade_to_200_when_rpc_down() {
	let mut soroban = mockito::Server::new_async().await;
	let _rpc = soroban
		.mock("POST", "/")
		.with_status(503)
		.create_async()
		.await;

	let state = test_state(test_config("http://h", "http://ht", &soroban.url(), "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/contracts/{}/events", CONTRACT_ID))
		.to_request();
	let resp = test::call_service(&app, req).await;
	assert_eq!(resp.status(), 200);

	let body: Value = test::read_body_json(resp).await;
	assert_eq!(body["events"], json!([]));
	assert_eq!(body["invocations"], json!([]));
	assert!(body["warning"].is_string());
}

#[actix_web::test]
async fn test_events_feed_decodes_and_derives_invocations() {
	let mut soroban = mockito::Server::new_async().await;

	let _health = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getHealth"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(
			r#"{"jsonrpc": "2.0", "id": 1, "result": {
				"status": "healthy", "latestLedger": 2000, "oldestLedger": 1000,
				"ledgerRetentionWindow": 1001
			}}"#,
		)
		.create_async()
		.await;

	let value_xdr = ScVal::U32(7).to_xdr_base64(Limits::none()).unwrap();
	let _events = soroban
		.mock("POST", "/")
		.match_body(Matcher::PartialJson(json!({"method": "getEvents"})))
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body(format!(
			r#"{{"jsonrpc": "2.0", "id": 1, "result": {{
				"events": [
					{{"id": "e1", "type": "contract", "ledger": 1500,
						"ledgerClosedAt": "2024-01-01T00:00:00Z", "txHash": "aaa",
						"inSuccessfulContractCall": true, "topic": [], "value": "{xdr}"}},
					{{"id": "e2", "type": "contract", "ledger": 1500,
						"ledgerClosedAt": "2024-01-01T00:00:00Z", "txHash": "aaa",
						"inSuccessfulContractCall": true, "topic": [], "value": "{xdr}"}}
				],
				"latestLedger": 2000,
				"cursor": "next-page"
			}}}}"#,
			xdr = value_xdr
		))
		.create_async()
		.await;

	let state = test_state(test_config("http://h", "http://ht", &soroban.url(), "http://e"));
	let app = test_app!(state);

	let req = test::TestRequest::get()
		.uri(&format!("/api/contracts/{}/events", CONTRACT_ID))
		.to_request();
	let body: Value = test::call_and_read_body_json(&app, req).await;

	assert_eq!(body["events"].as_array().unwrap().len(), 2);
	assert_eq!(body["events"][0]["valueJson"], 7);
	assert_eq!(body["invocations"].as_array().unwrap().len(), 1);
	assert_eq!(body["invocations"][0]["txHash"], "aaa");
	assert_eq!(body["cursor"], "next-page");
	assert!(body["warning"].is_null());
}
