//! Identity of this running instance

/// Version, identifier and pod name reported by `hello` and the response
/// identity headers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppIdentity {
    pub version: String,
    pub identifier: String,
    pub pod_name: String,
}

impl AppIdentity {
    pub fn new(
        version: impl Into<String>,
        identifier: impl Into<String>,
        pod_name: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            identifier: identifier.into(),
            pod_name: pod_name.into(),
        }
    }

    pub fn hello(&self) -> String {
        format!(
            "Version [{}] Hello from app [{}] on k8s pod [{}]",
            self.version, self.identifier, self.pod_name
        )
    }
}
