use async_trait::async_trait;
use pullwatch::prelude::*;

/// Mock PodLister returning a fixed pod inventory or a failure
pub struct MockPodLister {
    pods: Vec<PodImages>,
    should_fail: bool,
}

#[allow(dead_code)]
impl MockPodLister {
    pub fn new() -> Self {
        Self {
            pods: Vec::new(),
            should_fail: false,
        }
    }

    /// Adds a pod with the given main-container images
    pub fn with_pod(mut self, namespace: &str, name: &str, images: &[&str]) -> Self {
        self.pods.push(PodImages {
            namespace: namespace.to_string(),
            name: name.to_string(),
            containers: images.iter().map(|i| i.to_string()).collect(),
            init_containers: Vec::new(),
        });
        self
    }

    /// Adds init-container images to the most recently added pod
    pub fn with_init_images(mut self, images: &[&str]) -> Self {
        if let Some(pod) = self.pods.last_mut() {
            pod.init_containers
                .extend(images.iter().map(|i| i.to_string()));
        }
        self
    }

    pub fn failing() -> Self {
        Self {
            pods: Vec::new(),
            should_fail: true,
        }
    }
}

#[async_trait]
impl PodLister for MockPodLister {
    async fn list_pods(&self) -> Result<Vec<PodImages>> {
        if self.should_fail {
            anyhow::bail!("pods is forbidden: User \"system:anonymous\" cannot list resource \"pods\"");
        }
        Ok(self.pods.clone())
    }
}
