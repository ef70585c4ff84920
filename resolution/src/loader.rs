//! # Chain Loader
//!
//! Materializes the ancestor chain and side data a leaf needs before it is
//! resolved, using at most two batched collaborator calls.

use config::{DEFAULT_MAX_DEPTH, DEFAULT_PATH_DELIMITER, LoaderConfig};
use ec_core::{Node, NodeRepository, SideDataRecord, SideDataRepository};
use errors::LoaderError;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

use crate::telemetry::Telemetry;

/// Counts describing one [`ChainLoader::load`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// The leaf carried no empty-category configuration; nothing was fetched.
    pub skipped: bool,
    pub ancestors_requested: usize,
    pub ancestors_wired: usize,
    pub side_data_requested: usize,
    pub side_data_attached: usize
}

impl LoadReport {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }

    /// Number of batch fetches issued.
    pub fn fetches(&self) -> usize {
        usize::from(self.ancestors_requested > 0) + usize::from(self.side_data_requested > 0)
    }
}

/// Whether a node carries any empty-category configuration worth loading.
///
/// True when it has a message, references side data, or inherits.
pub fn is_relevant(node: &Node) -> bool {
    !node.message().is_empty() || !node.side_data_ref().is_empty() || node.inherits()
}

/// Prefetches ancestors and side data for a leaf category.
///
/// # M-CANONICAL-DOCS
///
/// ## Purpose
/// Replaces per-ancestor lookups with one batched node fetch and one batched
/// side-data fetch, then wires `parent` links and attaches side data so the
/// resolver can run without further I/O.
///
/// ## Usage
/// ```rust,no_run
/// use ec_core::Node;
/// use resolution::{ChainLoader, Resolver};
/// use std::sync::Arc;
/// use storage::InMemoryCategoryStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(InMemoryCategoryStore::new());
/// let loader = ChainLoader::new(store.clone(), store);
///
/// let mut leaf = Node::new("sandals").with_parent_id("shoes").with_path("|shoes|");
/// loader.load(&mut leaf).await?;
/// let config = Resolver::default().resolve(&leaf);
/// # Ok(())
/// # }
/// ```
///
/// ## Guarantees
/// - At most one node fetch and one side-data fetch per call
/// - At most `max_depth` ancestors are requested and wired
/// - Wiring stops at the first gap or the first non-inheriting ancestor
/// - Collaborator errors are returned unchanged inside [`LoaderError`]
pub struct ChainLoader<N, S> {
    nodes: N,
    side_data: S,
    max_depth: usize,
    path_delimiter: String
}

impl<N, S> ChainLoader<N, S>
where
    N: NodeRepository,
    S: SideDataRepository,
{
    pub fn new(nodes: N, side_data: S) -> Self {
        Self {
            nodes,
            side_data,
            max_depth: DEFAULT_MAX_DEPTH,
            path_delimiter: DEFAULT_PATH_DELIMITER.to_string()
        }
    }

    pub fn with_config(nodes: N, side_data: S, config: &LoaderConfig) -> Self {
        Self {
            nodes,
            side_data,
            max_depth: config.max_depth,
            path_delimiter: config.path_delimiter.clone()
        }
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Loads the ancestor chain and side data of `leaf` in place.
    ///
    /// Phase one fetches the ancestors of an inheriting leaf and links them
    /// through `parent`. Phase two fetches the side data referenced anywhere
    /// on the resulting chain and attaches it to each referencing node.
    pub async fn load(&self, leaf: &mut Node) -> Result<LoadReport, LoaderError> {
        if !is_relevant(leaf) {
            trace!(node_id = %leaf.id, "No empty-category configuration, skipping load");
            Telemetry::record_skipped();
            return Ok(LoadReport::skipped());
        }

        let mut report = LoadReport::default();

        if leaf.inherits() {
            let ids = self.ancestor_ids(leaf);
            if !ids.is_empty() {
                report.ancestors_requested = ids.len();
                Telemetry::record_fetch("nodes");

                let fetched = self.nodes.fetch_nodes(&ids).await.map_err(|e| {
                    Telemetry::record_fetch_error("nodes");
                    LoaderError::node_fetch(&ids, e)
                })?;

                let ancestors = self.wire_chain(leaf, fetched);
                report.ancestors_wired = ancestors.len();
                leaf.parent = link(ancestors);
            }
        }

        let refs = collect_side_data_refs(leaf, self.max_depth);
        if !refs.is_empty() {
            report.side_data_requested = refs.len();
            Telemetry::record_fetch("side_data");

            let records = self.side_data.fetch_side_data(&refs).await.map_err(|e| {
                Telemetry::record_fetch_error("side_data");
                LoaderError::side_data_fetch(&refs, e)
            })?;

            report.side_data_attached = attach_side_data(leaf, records, self.max_depth);
        }

        debug!(
            node_id = %leaf.id,
            ancestors_requested = report.ancestors_requested,
            ancestors_wired = report.ancestors_wired,
            side_data_requested = report.side_data_requested,
            side_data_attached = report.side_data_attached,
            "Loaded empty-category chain"
        );

        Ok(report)
    }

    /// Ancestor ids to request, nearest `max_depth` only.
    ///
    /// Taken from the path descriptor, or from `parent_id` when the path is
    /// absent or has no usable segments.
    fn ancestor_ids(&self, leaf: &Node) -> Vec<String> {
        let mut ids = leaf.path_segments(&self.path_delimiter);
        if ids.is_empty() {
            ids.extend(leaf.parent_id.clone());
        }

        if ids.len() > self.max_depth {
            ids.drain(..ids.len() - self.max_depth);
        }
        ids
    }

    /// Orders fetched ancestors from the leaf upward, nearest first.
    fn wire_chain(&self, leaf: &Node, fetched: Vec<Node>) -> Vec<Node> {
        let mut by_id: HashMap<String, Node> = fetched
            .into_iter()
            .map(|node| (node.id.clone(), node))
            .collect();

        let mut chain = Vec::new();
        let mut next_id = leaf.parent_id.clone();

        while let Some(parent_id) = next_id {
            if chain.len() >= self.max_depth {
                break;
            }

            let Some(parent) = by_id.remove(&parent_id) else {
                debug!(node_id = %leaf.id, missing = %parent_id, "Ancestor missing from fetch, chain truncated");
                break;
            };

            let continues = parent.inherits();
            next_id = parent.parent_id.clone();
            chain.push(parent);

            if !continues {
                break;
            }
        }

        chain
    }
}

/// Folds a nearest-first ancestor list into nested `parent` links.
fn link(chain: Vec<Node>) -> Option<Box<Node>> {
    chain.into_iter().rev().fold(None, |above, mut node| {
        node.parent = above;
        Some(Box::new(node))
    })
}

/// Distinct side-data references on the first `max_depth` chain nodes, the
/// same nodes the resolver may examine.
fn collect_side_data_refs(leaf: &Node, max_depth: usize) -> Vec<String> {
    let mut seen = HashSet::new();

    leaf.chain()
        .take(max_depth)
        .map(Node::side_data_ref)
        .filter(|reference| !reference.is_empty())
        .filter(|reference| seen.insert(*reference))
        .map(str::to_string)
        .collect()
}

/// Attaches fetched records to every chain node referencing them.
///
/// Returns the number of nodes that received a record.
fn attach_side_data(leaf: &mut Node, records: Vec<SideDataRecord>, max_depth: usize) -> usize {
    let by_id: HashMap<String, SideDataRecord> = records
        .into_iter()
        .map(|record| (record.id.clone(), record))
        .collect();

    let mut attached = 0;
    let mut depth = 0;
    let mut current = Some(leaf);

    while let Some(node) = current {
        if depth >= max_depth {
            break;
        }

        if let Some(record) = by_id.get(node.side_data_ref()) {
            let record = record.clone();
            node.attach_side_data(record);
            attached += 1;
        }

        current = node.parent.as_deref_mut();
        depth += 1;
    }

    attached
}
