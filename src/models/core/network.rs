use serde::{Deserialize, Serialize};

/// Chain identifier used when none is configured
pub const DEFAULT_CHAIN_ID: &str = "main";

/// Public RPC endpoint used when none is configured
pub const DEFAULT_RPC_URL: &str = "https://api.tez.ie/";

/// Capacity of the queue between the head monitor and the background renderer
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Timeout applied to every unary RPC request
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct RpcUrl {
	pub type_: String,
	pub url: String,
	pub weight: u32,
}

/// A Tezos node the inspector talks to
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Network {
	pub slug: String,
	pub name: String,
	/// Chain selector used in RPC paths, e.g. `main` or a chain id hash
	pub chain_id: String,
	pub rpc_urls: Vec<RpcUrl>,
	pub request_timeout_ms: Option<u64>,
	pub queue_capacity: Option<usize>,
}

impl Network {
	/// Builds a single-endpoint network from command line values
	pub fn from_endpoint(url: impl Into<String>, chain_id: impl Into<String>) -> Self {
		Self {
			slug: "tezos".to_string(),
			name: "Tezos".to_string(),
			chain_id: chain_id.into(),
			rpc_urls: vec![RpcUrl {
				type_: "rpc".to_string(),
				url: url.into(),
				weight: 100,
			}],
			request_timeout_ms: None,
			queue_capacity: None,
		}
	}

	pub fn request_timeout_ms(&self) -> u64 {
		self.request_timeout_ms.unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
	}

	pub fn queue_capacity(&self) -> usize {
		self.queue_capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY)
	}
}

impl Default for Network {
	fn default() -> Self {
		Self::from_endpoint(DEFAULT_RPC_URL, DEFAULT_CHAIN_ID)
	}
}
