use crate::shared::Result;
use async_trait::async_trait;

/// Image fields of a single pod spec
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PodImages {
    pub namespace: String,
    pub name: String,
    /// Images of the main containers
    pub containers: Vec<String>,
    /// Images of the init containers
    pub init_containers: Vec<String>,
}

impl PodImages {
    /// All images of the pod, main containers first
    pub fn images(&self) -> impl Iterator<Item = &str> {
        self.containers
            .iter()
            .chain(self.init_containers.iter())
            .map(String::as_str)
    }
}

/// PodLister port for enumerating pods across all namespaces
///
/// # Errors
/// Implementations fail on connection, authentication or authorization
/// problems. A partial listing must never be returned as success.
#[async_trait]
pub trait PodLister: Send + Sync {
    /// Lists every pod in every namespace
    async fn list_pods(&self) -> Result<Vec<PodImages>>;
}
