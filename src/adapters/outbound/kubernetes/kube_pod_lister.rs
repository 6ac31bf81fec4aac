use crate::ports::outbound::{PodImages, PodLister};
use crate::shared::error::PullwatchError;
use crate::shared::Result;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::{Container, Pod};
use kube::api::{Api, ListParams};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default kubeconfig location relative to the home directory
const DEFAULT_KUBECONFIG: &str = ".kube/config";

/// KubePodLister adapter listing pods through the Kubernetes API
pub struct KubePodLister {
    client: Client,
    timeout: Duration,
}

impl KubePodLister {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Builds a client from a kubeconfig file.
    ///
    /// With no explicit path, `$HOME/.kube/config` is used when it exists;
    /// otherwise the configuration is inferred from the environment
    /// (in-cluster service account or `KUBECONFIG`).
    pub async fn from_kubeconfig(kubeconfig: Option<PathBuf>, timeout: Duration) -> Result<Self> {
        let path = kubeconfig.or_else(|| default_kubeconfig().filter(|path| path.is_file()));

        let config = match path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading kubeconfig");
                load_kubeconfig(&path).await?
            }
            None => {
                tracing::debug!("no kubeconfig file, inferring cluster configuration");
                Config::infer()
                    .await
                    .map_err(|e| PullwatchError::ClusterConfig {
                        source_name: "in-cluster environment".to_string(),
                        details: e.to_string(),
                    })?
            }
        };

        let client = Client::try_from(config).map_err(|e| PullwatchError::ClusterConfig {
            source_name: "client".to_string(),
            details: e.to_string(),
        })?;

        Ok(Self::new(client, timeout))
    }
}

async fn load_kubeconfig(path: &Path) -> Result<Config> {
    let source_name = path.display().to_string();
    let kubeconfig = Kubeconfig::read_from(path).map_err(|e| PullwatchError::ClusterConfig {
        source_name: source_name.clone(),
        details: e.to_string(),
    })?;

    let config = Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .map_err(|e| PullwatchError::ClusterConfig {
            source_name,
            details: e.to_string(),
        })?;
    Ok(config)
}

fn default_kubeconfig() -> Option<PathBuf> {
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(DEFAULT_KUBECONFIG))
}

fn container_images(containers: &[Container]) -> Vec<String> {
    containers
        .iter()
        .filter_map(|container| container.image.clone())
        .collect()
}

/// Extracts the container and init-container images of a pod.
fn pod_images(pod: &Pod) -> PodImages {
    let (containers, init_containers) = match &pod.spec {
        Some(spec) => (
            container_images(&spec.containers),
            spec.init_containers
                .as_deref()
                .map(container_images)
                .unwrap_or_default(),
        ),
        None => (Vec::new(), Vec::new()),
    };

    PodImages {
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        name: pod.metadata.name.clone().unwrap_or_default(),
        containers,
        init_containers,
    }
}

#[async_trait]
impl PodLister for KubePodLister {
    async fn list_pods(&self) -> Result<Vec<PodImages>> {
        let api: Api<Pod> = Api::all(self.client.clone());

        let pods = tokio::time::timeout(self.timeout, api.list(&ListParams::default()))
            .await
            .map_err(|_| PullwatchError::ClusterQuery {
                details: format!("timed out after {}s", self.timeout.as_secs()),
            })?
            .map_err(|e| PullwatchError::ClusterQuery {
                details: e.to_string(),
            })?;

        tracing::debug!(count = pods.items.len(), "listed pods");
        Ok(pods.items.iter().map(pod_images).collect())
    }
}
