//! Chain loader tests against the in-memory category store.

use async_trait::async_trait;
use ec_core::{Node, NodeRepository, RawFields, SideDataRecord, SideDataRepository, fields};
use errors::{LoaderError, StorageError};
use resolution::{ChainLoader, DisplayConfig, EmptyCategoryService, LoadReport, Resolver};
use std::error::Error as _;
use std::sync::Arc;
use storage::InMemoryCategoryStore;
use testing::{linear_tree, set_field};

async fn store_with(nodes: &[Node]) -> Arc<InMemoryCategoryStore> {
    let store = Arc::new(InMemoryCategoryStore::new());
    for node in nodes {
        store.insert_node(node.clone()).await;
    }
    store
}

fn loader(store: &Arc<InMemoryCategoryStore>) -> ChainLoader<Arc<InMemoryCategoryStore>, Arc<InMemoryCategoryStore>> {
    ChainLoader::new(store.clone(), store.clone())
}

fn chain_ids(node: &Node) -> Vec<&str> {
    node.chain().map(|n| n.id.as_str()).collect()
}

#[tokio::test]
async fn test_irrelevant_leaf_is_skipped_without_fetching() {
    let mut tree = linear_tree("cat", 3);
    set_field(&mut tree, "cat-2", fields::INHERIT, false);
    let store = store_with(&tree).await;
    let mut leaf = tree[2].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report, LoadReport::skipped());
    assert_eq!(store.node_fetches(), 0);
    assert_eq!(store.side_data_fetches(), 0);
    assert!(leaf.parent.is_none());
}

#[tokio::test]
async fn test_non_inheriting_leaf_fetches_no_ancestors() {
    let mut tree = linear_tree("cat", 3);
    set_field(&mut tree, "cat-2", fields::INHERIT, false);
    set_field(&mut tree, "cat-2", fields::MESSAGE, "<p>own</p>");
    set_field(&mut tree, "cat-2", fields::SIDE_DATA_REF, "img-own");
    let store = store_with(&tree).await;
    store
        .insert_side_data(SideDataRecord::new("img-own", "https://cdn.example/own.png"))
        .await;
    let mut leaf = tree[2].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(store.node_fetches(), 0);
    assert_eq!(store.side_data_fetches(), 1);
    assert_eq!(report.ancestors_requested, 0);
    assert_eq!(report.side_data_attached, 1);
    assert_eq!(
        Resolver::default().resolve(&leaf).side_data_url(),
        "https://cdn.example/own.png"
    );
}

#[tokio::test]
async fn test_inheriting_leaf_wires_full_chain() {
    let mut tree = linear_tree("cat", 4);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>root</p>");
    let store = store_with(&tree).await;
    let mut leaf = tree[3].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_requested, 3);
    assert_eq!(report.ancestors_wired, 3);
    assert_eq!(report.fetches(), 1);
    assert_eq!(chain_ids(&leaf), vec!["cat-3", "cat-2", "cat-1", "cat-0"]);
    assert_eq!(Resolver::default().resolve(&leaf).message(), "<p>root</p>");
}

#[tokio::test]
async fn test_at_most_two_fetches_and_ten_ancestors() {
    let mut tree = linear_tree("deep", 16);
    for node in &mut tree {
        node.fields.insert(fields::SIDE_DATA_REF, format!("img-{}", node.id));
    }
    let store = store_with(&tree).await;
    let mut leaf = tree[15].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(store.node_fetches(), 1);
    assert_eq!(store.side_data_fetches(), 1);
    assert_eq!(report.ancestors_requested, 10);
    assert_eq!(report.ancestors_wired, 10);
    assert_eq!(report.side_data_requested, 10);
    assert_eq!(leaf.chain().count(), 11);
}

#[tokio::test]
async fn test_fifteen_deep_chain_hits_depth_limit() {
    let mut tree = linear_tree("deep", 15);
    set_field(&mut tree, "deep-0", fields::MESSAGE, "<p>root</p>");
    let store = store_with(&tree).await;
    let mut leaf = tree[14].clone();

    loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(Resolver::default().resolve(&leaf), DisplayConfig::empty());
}

#[tokio::test]
async fn test_owner_within_depth_limit_resolves() {
    let mut tree = linear_tree("deep", 15);
    set_field(&mut tree, "deep-5", fields::MESSAGE, "<p>nine up</p>");
    let store = store_with(&tree).await;
    let mut leaf = tree[14].clone();

    loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(Resolver::default().resolve(&leaf).message(), "<p>nine up</p>");
}

#[tokio::test]
async fn test_wiring_stops_at_non_inheriting_ancestor() {
    let mut tree = linear_tree("cat", 4);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>root</p>");
    set_field(&mut tree, "cat-2", fields::INHERIT, false);
    let store = store_with(&tree).await;
    let mut leaf = tree[3].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_requested, 3);
    assert_eq!(report.ancestors_wired, 1);
    assert_eq!(chain_ids(&leaf), vec!["cat-3", "cat-2"]);
    assert!(!Resolver::default().resolve(&leaf).has_content());
}

#[tokio::test]
async fn test_non_inheriting_ancestor_with_message_still_owns() {
    let mut tree = linear_tree("cat", 3);
    set_field(&mut tree, "cat-1", fields::INHERIT, false);
    set_field(&mut tree, "cat-1", fields::MESSAGE, "<p>middle</p>");
    let store = store_with(&tree).await;
    let mut leaf = tree[2].clone();

    loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(Resolver::default().resolve(&leaf).message(), "<p>middle</p>");
}

#[tokio::test]
async fn test_gap_truncates_chain() {
    let mut tree = linear_tree("cat", 4);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>root</p>");
    let without_middle: Vec<Node> = tree.iter().filter(|n| n.id != "cat-1").cloned().collect();
    let store = store_with(&without_middle).await;
    let mut leaf = tree[3].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_wired, 1);
    assert_eq!(chain_ids(&leaf), vec!["cat-3", "cat-2"]);
    assert!(!Resolver::default().resolve(&leaf).has_message());
}

#[tokio::test]
async fn test_parent_id_used_when_path_is_missing() {
    let parent = Node::new("parent").with_fields(RawFields::new().with(fields::MESSAGE, "<p>p</p>"));
    let store = store_with(&[parent]).await;
    let mut leaf = Node::new("leaf")
        .with_parent_id("parent")
        .with_fields(RawFields::new().with(fields::INHERIT, true));

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_requested, 1);
    assert_eq!(Resolver::default().resolve(&leaf).message(), "<p>p</p>");
}

#[tokio::test]
async fn test_cyclic_parent_ids_terminate() {
    let a = Node::new("a")
        .with_parent_id("b")
        .with_fields(RawFields::new().with(fields::INHERIT, true));
    let b = Node::new("b")
        .with_parent_id("a")
        .with_fields(RawFields::new().with(fields::INHERIT, true));
    let store = store_with(&[a, b]).await;
    let mut leaf = Node::new("leaf")
        .with_parent_id("a")
        .with_path("|b|a|")
        .with_fields(RawFields::new().with(fields::INHERIT, true));

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_wired, 2);
    assert_eq!(Resolver::default().resolve(&leaf), DisplayConfig::empty());
}

#[tokio::test]
async fn test_shared_side_data_is_requested_once() {
    let mut tree = linear_tree("cat", 3);
    set_field(&mut tree, "cat-1", fields::MESSAGE, "<p>parent</p>");
    set_field(&mut tree, "cat-1", fields::SIDE_DATA_REF, "img-shared");
    set_field(&mut tree, "cat-2", fields::SIDE_DATA_REF, "img-shared");
    let store = store_with(&tree).await;
    store
        .insert_side_data(SideDataRecord::new("img-shared", "https://cdn.example/shared.png"))
        .await;
    let mut leaf = tree[2].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.side_data_requested, 1);
    assert_eq!(report.side_data_attached, 2);
    let config = Resolver::default().resolve(&leaf);
    assert_eq!(config.message(), "<p>parent</p>");
    assert_eq!(config.side_data_url(), "https://cdn.example/shared.png");
}

#[tokio::test]
async fn test_owner_side_data_wins_over_leaf_side_data() {
    let mut tree = linear_tree("cat", 2);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>root</p>");
    set_field(&mut tree, "cat-0", fields::SIDE_DATA_REF, "img-root");
    set_field(&mut tree, "cat-1", fields::SIDE_DATA_REF, "img-leaf");
    let store = store_with(&tree).await;
    store
        .insert_side_data(SideDataRecord::new("img-root", "https://cdn.example/root.png"))
        .await;
    store
        .insert_side_data(SideDataRecord::new("img-leaf", "https://cdn.example/leaf.png"))
        .await;
    let mut leaf = tree[1].clone();

    loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(
        Resolver::default().resolve(&leaf).side_data_url(),
        "https://cdn.example/root.png"
    );
}

#[tokio::test]
async fn test_dangling_side_data_reference() {
    let mut tree = linear_tree("cat", 1);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>m</p>");
    set_field(&mut tree, "cat-0", fields::SIDE_DATA_REF, "img-gone");
    let store = store_with(&tree).await;
    let mut leaf = tree[0].clone();

    let report = loader(&store).load(&mut leaf).await.unwrap();

    assert_eq!(report.side_data_requested, 1);
    assert_eq!(report.side_data_attached, 0);
    let config = Resolver::default().resolve(&leaf);
    assert_eq!(config.side_data_url(), "");
    assert!(config.has_content());
}

#[tokio::test]
async fn test_custom_max_depth_bounds_request() {
    let tree = linear_tree("cat", 8);
    let store = store_with(&tree).await;
    let mut leaf = tree[7].clone();

    let report = loader(&store).with_max_depth(3).load(&mut leaf).await.unwrap();

    assert_eq!(report.ancestors_requested, 3);
    assert_eq!(chain_ids(&leaf), vec!["cat-7", "cat-6", "cat-5", "cat-4"]);
}

struct FailingRepository;

#[async_trait]
impl NodeRepository for FailingRepository {
    type Error = StorageError;

    async fn fetch_nodes(&self, _ids: &[String]) -> Result<Vec<Node>, Self::Error> {
        Err(StorageError::ConnectionError {
            backend: "postgres".to_string(),
            reason: "connection refused".to_string()
        })
    }
}

#[async_trait]
impl SideDataRepository for FailingRepository {
    type Error = StorageError;

    async fn fetch_side_data(&self, _ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error> {
        Err(StorageError::QueryError {
            backend: "postgres".to_string(),
            reason: "timeout".to_string()
        })
    }
}

#[tokio::test]
async fn test_node_fetch_error_is_propagated() {
    let store = Arc::new(InMemoryCategoryStore::new());
    let loader = ChainLoader::new(FailingRepository, store);
    let mut leaf = linear_tree("cat", 2).remove(1);

    let err = loader.load(&mut leaf).await.unwrap_err();

    match &err {
        LoaderError::NodeFetch { requested, .. } => assert_eq!(requested, &["cat-0".to_string()]),
        other => panic!("unexpected error: {other}")
    }
    let source = err.source().unwrap();
    assert!(source.downcast_ref::<StorageError>().is_some());
    assert!(leaf.parent.is_none());
}

#[tokio::test]
async fn test_side_data_fetch_error_is_propagated() {
    let store = Arc::new(InMemoryCategoryStore::new());
    let loader = ChainLoader::new(store, FailingRepository);
    let mut leaf = Node::new("leaf").with_fields(RawFields::new().with(fields::SIDE_DATA_REF, "img"));

    let err = loader.load(&mut leaf).await.unwrap_err();

    match &err {
        LoaderError::SideDataFetch { requested, .. } => assert_eq!(requested, &["img".to_string()]),
        other => panic!("unexpected error: {other}")
    }
    assert!(err.to_string().contains("timeout"));
}

#[tokio::test]
async fn test_service_loads_and_resolves() {
    let mut tree = linear_tree("cat", 3);
    set_field(&mut tree, "cat-0", fields::MESSAGE, "<p>root</p>");
    set_field(&mut tree, "cat-0", fields::CSS_CLASS, "empty <b>box</b>");
    let store = store_with(&tree).await;
    let service = EmptyCategoryService::new(loader(&store), Resolver::default());
    let mut leaf = tree[2].clone();

    let config = service.display_config(Some(&mut leaf)).await.unwrap();

    assert_eq!(config.message(), "<p>root</p>");
    assert_eq!(config.css_class(), "empty bboxb");
}

#[tokio::test]
async fn test_service_without_node_does_not_fetch() {
    let store = Arc::new(InMemoryCategoryStore::new());
    let service = EmptyCategoryService::new(loader(&store), Resolver::default());

    let config = service.display_config(None).await.unwrap();

    assert_eq!(config, DisplayConfig::empty());
    assert_eq!(store.node_fetches(), 0);
}
