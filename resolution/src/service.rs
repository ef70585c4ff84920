//! Load-then-resolve entry point used by the presentation layer.

use config::Config;
use ec_core::{Node, NodeRepository, SideDataRepository};
use errors::LoaderError;

use crate::loader::ChainLoader;
use crate::message::DisplayConfig;
use crate::resolver::Resolver;

/// Pairs a [`ChainLoader`] with a [`Resolver`].
pub struct EmptyCategoryService<N, S> {
    loader: ChainLoader<N, S>,
    resolver: Resolver
}

impl<N, S> EmptyCategoryService<N, S>
where
    N: NodeRepository,
    S: SideDataRepository,
{
    pub fn new(loader: ChainLoader<N, S>, resolver: Resolver) -> Self {
        Self { loader, resolver }
    }

    pub fn from_config(nodes: N, side_data: S, config: &Config) -> Self {
        Self {
            loader: ChainLoader::with_config(nodes, side_data, &config.loader),
            resolver: Resolver::from_config(&config.resolver)
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    /// Loads the chain of `node` and resolves it; `None` yields the empty
    /// configuration without touching storage.
    pub async fn display_config(&self, node: Option<&mut Node>) -> Result<DisplayConfig, LoaderError> {
        let Some(node) = node else {
            return Ok(DisplayConfig::empty());
        };

        self.loader.load(node).await?;
        Ok(self.resolver.resolve(node))
    }
}
