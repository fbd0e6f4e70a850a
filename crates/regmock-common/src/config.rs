//! Lifecycle configuration for a mock registry instance.

use std::time::Duration;

/// Settings governing how a registry instance binds and reports readiness.
///
/// Constructed once and handed to the lifecycle manager; nothing reads
/// configuration from files, flags, or the environment.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Address to bind; port 0 requests an OS-assigned ephemeral port.
    pub bind_addr: String,
    /// Hard ceiling on the total readiness wait before startup fails.
    pub readiness_timeout: Duration,
    /// Fixed delay between readiness probe attempts.
    pub readiness_poll_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".to_string(),
            readiness_timeout: Duration::from_secs(5),
            readiness_poll_interval: Duration::from_millis(100),
        }
    }
}
