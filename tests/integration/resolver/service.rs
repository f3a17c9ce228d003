use std::sync::Arc;

use tezos_inspector::{
	services::{
		blockchain::BlockChainError,
		resolver::{BlockResolver, ResolverError},
	},
	utils::tests::builders::tezos::block_hash,
};

use crate::integration::mocks::{chain_of, node_serving, MockNodeService};

fn resolver_over(
	head: i64,
) -> (
	BlockResolver<MockNodeService>,
	Arc<std::sync::Mutex<Vec<String>>>,
) {
	let (node, requested) = node_serving(chain_of(head));
	(BlockResolver::new(Arc::new(node), "main"), requested)
}

#[tokio::test]
async fn test_resolve_head() {
	let (resolver, requested) = resolver_over(100);

	let block = resolver.resolve("head", false).await.unwrap();
	assert_eq!(block.level(), 100);
	assert!(block.successor().is_none());
	assert_eq!(*requested.lock().unwrap(), vec!["head"]);
}

#[tokio::test]
async fn test_resolve_tilde_offsets_from_head() {
	let (resolver, requested) = resolver_over(100);

	let block = resolver.resolve("head~2", false).await.unwrap();
	assert_eq!(block.level(), 98);
	assert_eq!(*requested.lock().unwrap(), vec!["head", "98"]);

	let block = resolver.resolve("head~~~", false).await.unwrap();
	assert_eq!(block.level(), 97);
}

#[tokio::test]
async fn test_resolve_level_with_positive_offset() {
	let (resolver, requested) = resolver_over(100);

	let block = resolver.resolve("50+1", false).await.unwrap();
	assert_eq!(block.level(), 51);
	assert_eq!(*requested.lock().unwrap(), vec!["51"]);
}

#[tokio::test]
async fn test_resolve_hash_anchor() {
	let (resolver, _) = resolver_over(100);

	let block = resolver.resolve(&block_hash(40), false).await.unwrap();
	assert_eq!(block.level(), 40);

	let block = resolver
		.resolve(&format!("{}~5", block_hash(40)), false)
		.await
		.unwrap();
	assert_eq!(block.level(), 35);
}

#[tokio::test]
async fn test_successor_is_attached_when_requested() {
	let (resolver, requested) = resolver_over(100);

	let block = resolver.resolve("50", true).await.unwrap();
	assert_eq!(block.level(), 50);
	assert_eq!(block.successor().map(|next| next.level()), Some(51));
	assert_eq!(*requested.lock().unwrap(), vec!["50", "51"]);
}

#[tokio::test]
async fn test_missing_successor_is_not_an_error() {
	let (resolver, _) = resolver_over(100);

	let block = resolver.resolve("head", true).await.unwrap();
	assert_eq!(block.level(), 100);
	assert!(block.successor().is_none());
}

#[tokio::test]
async fn test_failing_successor_lookup_degrades_to_absent() {
	let mut node = MockNodeService::new();
	node.expect_get_block().returning(|_, block_id| match block_id {
		"7" => Ok(chain_of(7).remove(6)),
		_ => Err(BlockChainError::connection_error("connection reset")),
	});
	let resolver = BlockResolver::new(Arc::new(node), "main");

	let block = resolver.resolve("7", true).await.unwrap();
	assert_eq!(block.level(), 7);
	assert!(block.successor().is_none());
}

#[tokio::test]
async fn test_unknown_level_is_a_resolution_error() {
	let (resolver, _) = resolver_over(10);

	let err = resolver.resolve("500", false).await.unwrap_err();
	assert!(matches!(err, ResolverError::ResolutionError(_)));
}

#[tokio::test]
async fn test_negative_target_is_rejected_before_fetch() {
	let mut node = MockNodeService::new();
	node.expect_get_block().times(0);
	let resolver = BlockResolver::new(Arc::new(node), "main");

	let err = resolver.resolve("~3", false).await.unwrap_err();
	assert!(matches!(err, ResolverError::ResolutionError(_)));
}

#[tokio::test]
async fn test_unparseable_reference_is_rejected_before_fetch() {
	let mut node = MockNodeService::new();
	node.expect_get_block().times(0);
	let resolver = BlockResolver::new(Arc::new(node), "main");

	let err = resolver.resolve("head~x", false).await.unwrap_err();
	assert!(matches!(err, ResolverError::ParseError(_)));
}

#[tokio::test]
async fn test_transport_failure_propagates() {
	let mut node = MockNodeService::new();
	node.expect_get_block()
		.returning(|_, _| Err(BlockChainError::connection_error("node unreachable")));
	let resolver = BlockResolver::new(Arc::new(node), "main");

	let err = resolver.resolve("head", false).await.unwrap_err();
	assert!(matches!(err, ResolverError::TransportError(_)));
}

#[tokio::test]
async fn test_resolve_all_keeps_order_and_stops_on_failure() {
	let (resolver, requested) = resolver_over(20);

	let blocks = resolver
		.resolve_all(["3", "head", "head~1"], false)
		.await
		.unwrap();
	let levels: Vec<_> = blocks.iter().map(|block| block.level()).collect();
	assert_eq!(levels, vec![3, 20, 19]);

	requested.lock().unwrap().clear();
	let err = resolver
		.resolve_all(["3", "99", "4"], false)
		.await
		.unwrap_err();
	assert!(matches!(err, ResolverError::ResolutionError(_)));
	assert_eq!(*requested.lock().unwrap(), vec!["3", "99"]);
}
