//! Horizon client behavior against a mocked upstream.

use lumenscope::{
	models::Network,
	services::horizon::{HorizonClient, HorizonError},
	utils::RetryConfig,
};

use crate::integration::common::UNREACHABLE;

fn no_retry() -> RetryConfig {
	RetryConfig {
		max_retries: 0,
		..Default::default()
	}
}

#[tokio::test]
async fn test_server_error_maps_to_upstream_error() {
	let mut server = mockito::Server::new_async().await;
	let _mock = server
		.mock("GET", "/ledgers?order=desc&limit=5")
		.with_status(502)
		.with_body("bad gateway")
		.create_async()
		.await;

	let client = HorizonClient::new(&server.url(), Network::Mainnet, &no_retry()).unwrap();
	let result = client.get_ledgers(5).await;
	assert!(matches!(result, Err(HorizonError::UpstreamError(_))));
}

#[tokio::test]
async fn test_connection_refused_maps_to_network_error() {
	let client = HorizonClient::new(UNREACHABLE, Network::Mainnet, &no_retry()).unwrap();
	let result = client.get_ledgers(5).await;
	assert!(matches!(result, Err(HorizonError::NetworkError(_))));
}

#[tokio::test]
async fn test_malformed_body_maps_to_parse_error() {
	let mut server = mockito::Server::new_async().await;
	let _mock = server
		.mock("GET", "/ledgers?order=desc&limit=5")
		.with_status(200)
		.with_header("content-type", "application/json")
		.with_body("not json at all")
		.create_async()
		.await;

	let client = HorizonClient::new(&server.url(), Network::Mainnet, &no_retry()).unwrap();
	let result = client.get_ledgers(5).await;
	assert!(matches!(result, Err(HorizonError::ParseError(_))));
}

#[tokio::test]
async fn test_transient_errors_are_retried() {
	let mut server = mockito::Server::new_async().await;
	let mock = server
		.mock("GET", "/ledgers?order=desc&limit=1")
		.with_status(500)
		.expect(3)
		.create_async()
		.await;

	let retry = RetryConfig {
		max_retries: 2,
		initial_backoff: std::time::Duration::from_millis(10),
		max_backoff: std::time::Duration::from_millis(50),
		..Default::default()
	};
	let client = HorizonClient::new(&server.url(), Network::Mainnet, &retry).unwrap();
	let result = client.get_ledgers(1).await;
	assert!(result.is_err());
	mock.assert_async().await;
}
