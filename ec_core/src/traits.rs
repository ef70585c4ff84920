//! Collaborator traits for loading the category tree.

use async_trait::async_trait;

use crate::types::{Node, SideDataRecord};

/// Batch lookup of category nodes by identifier.
///
/// Identifiers without a stored node are simply absent from the result.
#[async_trait]
pub trait NodeRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_nodes(&self, ids: &[String]) -> Result<Vec<Node>, Self::Error>;
}

/// Batch lookup of side-data records (image metadata) by identifier.
///
/// Identifiers without a stored record are simply absent from the result.
#[async_trait]
pub trait SideDataRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn fetch_side_data(&self, ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error>;
}

#[async_trait]
impl<T: NodeRepository + ?Sized> NodeRepository for std::sync::Arc<T> {
    type Error = T::Error;

    async fn fetch_nodes(&self, ids: &[String]) -> Result<Vec<Node>, Self::Error> {
        (**self).fetch_nodes(ids).await
    }
}

#[async_trait]
impl<T: SideDataRepository + ?Sized> SideDataRepository for std::sync::Arc<T> {
    type Error = T::Error;

    async fn fetch_side_data(&self, ids: &[String]) -> Result<Vec<SideDataRecord>, Self::Error> {
        (**self).fetch_side_data(ids).await
    }
}
