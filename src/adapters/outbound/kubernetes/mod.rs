mod kube_pod_lister;

pub use kube_pod_lister::KubePodLister;
