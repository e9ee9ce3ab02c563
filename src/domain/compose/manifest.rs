use std::fmt;

use serde::{Serialize, Serializer};

/// Service names are fixed: the proxy upstream refers to the backend by name.
pub const WEBSERVER_SERVICE: &str = "webserver";
pub const BACKEND_SERVICE: &str = "backend";

/// `HOST:CONTAINER` port publication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl PortMapping {
    pub fn same(port: u16) -> Self {
        Self { host: port, container: port }
    }
}

impl fmt::Display for PortMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)
    }
}

impl Serialize for PortMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// `HOST:CONTAINER[:ro]` bind mount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VolumeMount {
    pub host: String,
    pub container: String,
    pub read_only: bool,
}

impl VolumeMount {
    pub fn bind(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self { host: host.into(), container: container.into(), read_only: false }
    }

    pub fn read_only(host: impl Into<String>, container: impl Into<String>) -> Self {
        Self { host: host.into(), container: container.into(), read_only: true }
    }
}

impl fmt::Display for VolumeMount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.container)?;
        if self.read_only {
            write!(f, ":ro")?;
        }
        Ok(())
    }
}

impl Serialize for VolumeMount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Network {
    pub name: String,
    pub driver: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildContext {
    pub context: String,
    pub dockerfile: String,
}

/// One compose service. Exactly one of `image` and `build` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Service {
    pub name: String,
    pub image: Option<String>,
    pub build: Option<BuildContext>,
    pub container_name: String,
    pub restart: String,
    pub ports: Vec<PortMapping>,
    pub volumes: Vec<VolumeMount>,
    pub networks: Vec<String>,
}

/// The two-container orchestration manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeManifest {
    pub network: Network,
    pub webserver: Service,
    pub backend: Service,
}

impl ComposeManifest {
    pub fn services(&self) -> [&Service; 2] {
        [&self.webserver, &self.backend]
    }
}

/// Serialized shape handed to the template: services as an ordered list.
impl Serialize for ComposeManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct View<'a> {
            network: &'a Network,
            services: [&'a Service; 2],
        }

        View { network: &self.network, services: self.services() }.serialize(serializer)
    }
}
