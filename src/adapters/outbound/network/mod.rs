/// Network adapters for registry rate-limit APIs
mod docker_hub_client;
mod github_client;

pub use docker_hub_client::{DockerHubAuth, DockerHubClient};
pub use github_client::GitHubClient;
