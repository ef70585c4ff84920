use async_trait::async_trait;
use ec_core::{Node, NodeRepository, SideDataRecord, SideDataRepository};
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

use crate::snapshot::TreeSnapshot;

/// Category tree held in process memory.
///
/// Counts every batch fetch so callers can assert how many round trips a
/// load issued.
#[derive(Debug, Default)]
pub struct InMemoryCategoryStore {
    nodes: RwLock<HashMap<String, Node>>,
    side_data: RwLock<HashMap<String, SideDataRecord>>,
    node_fetches: AtomicUsize,
    side_data_fetches: AtomicUsize
}

impl InMemoryCategoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: TreeSnapshot) -> Self {
        let nodes = snapshot
            .nodes
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();
        let side_data = snapshot
            .side_data
            .into_iter()
            .map(|record| (record.id.clone(), record))
            .collect();

        Self {
            nodes: RwLock::new(nodes),
            side_data: RwLock::new(side_data),
            ..Self::default()
        }
    }

    /// Stores `node` without its transient `parent` and side data.
    pub async fn insert_node(&self, mut node: Node) {
        node.parent = None;
        node.side_data.clear();
        self.nodes.write().await.insert(node.id.clone(), node);
    }

    pub async fn insert_side_data(&self, record: SideDataRecord) {
        self.side_data.write().await.insert(record.id.clone(), record);
    }

    pub async fn get_node(&self, id: &str) -> Option<Node> {
        self.nodes.read().await.get(id).cloned()
    }

    pub async fn node_count(&self) -> usize {
        self.nodes.read().await.len()
    }

    pub fn node_fetches(&self) -> usize {
        self.node_fetches.load(Ordering::SeqCst)
    }

    pub fn side_data_fetches(&self) -> usize {
        self.side_data_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeRepository for InMemoryCategoryStore {
    type Error = Infallible;

    async fn fetch_nodes(&self, ids: &[String]) -> Result<Vec<Node>, Self::Error> {
        self.node_fetches.fetch_add(1, Ordering::SeqCst);
        let nodes = self.nodes.read().await;
        Ok(ids.iter().filter_map(|id| nodes.get(id).cloned()).collect())
    }
}

#[async_trait]
impl SideDataRepository for InMemoryCategoryStore {
    type Error = Infallible;

    async fn fetch_side_data(&self, ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error> {
        self.side_data_fetches.fetch_add(1, Ordering::SeqCst);
        let side_data = self.side_data.read().await;
        Ok(ids.iter().filter_map(|id| side_data.get(id).cloned()).collect())
    }
}
