//! Helpers shared by the reqwest-backed integration tests.

#![allow(dead_code)]

// std
use std::sync::Arc;
// self
use oauth2_poniverse::{
	config::StrategyOptions,
	http::ReqwestHttpClient,
	poniverse::{self, PoniverseProfile, PoniverseStrategy},
	reqwest::Client,
	strategy::{Strategy, Verify},
};

/// Builds a reqwest HTTP client that accepts the self-signed certificates produced by
/// `httpmock` during tests.
pub fn test_reqwest_http_client() -> ReqwestHttpClient {
	let client = Client::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestHttpClient::with_client(client)
}

/// Builds a Poniverse strategy from `options` on top of [`test_reqwest_http_client`].
pub fn build_test_strategy<V>(options: StrategyOptions, verify: V) -> PoniverseStrategy<V>
where
	V: Verify,
{
	let config =
		options.build(&poniverse::DEFAULTS).expect("Test strategy options should build.");
	let profile = Arc::new(PoniverseProfile::from_config(&config));

	Strategy::with_http_client(config, profile, verify, test_reqwest_http_client())
		.expect("Test strategy should build.")
}
