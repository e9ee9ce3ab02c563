use serde::Serialize;

/// One Nginx `server { ... }` unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerBlock {
    pub app: String,
    pub listen: u16,
    pub root: String,
    pub index: Vec<String>,
    pub error_log: String,
    pub access_log: String,
    /// FastCGI upstream for `*.php` requests (`host:port`).
    pub upstream: String,
}

/// The proxy site configuration: server blocks in descriptor order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProxyConfig {
    pub server_blocks: Vec<ServerBlock>,
}

impl ProxyConfig {
    pub fn listen_ports(&self) -> Vec<u16> {
        self.server_blocks.iter().map(|block| block.listen).collect()
    }
}
