//! Storage-network models.
//!
//! The storage-clustering service runs over one of the host's VMkernel
//! network interfaces. A host is ready to join a storage cluster once its
//! storage-network config carries at least one port bound to a VMkernel
//! device.

use serde::{Deserialize, Serialize};

/// A VMkernel virtual network interface on a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VirtualNic {
    /// Device name, e.g. "vmk0".
    pub device: String,
}

/// One storage-network port binding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortConfig {
    /// Device name of the VMkernel interface used for storage traffic.
    pub device: String,
}

/// Storage-network configuration of a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageNetworkConfig {
    /// Whether the storage-clustering service is enabled on this host.
    /// Must stay false until the host has joined a storage cluster.
    pub enabled: bool,
    /// Port bindings carrying storage traffic.
    #[serde(default)]
    pub ports: Vec<PortConfig>,
}

impl StorageNetworkConfig {
    /// True when the host's network interface is ready to connect to a
    /// storage cluster: at least one port bound to a named device.
    pub fn is_ready(&self) -> bool {
        self.ports.iter().any(|p| !p.device.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_with_bound_port() {
        let config = StorageNetworkConfig {
            enabled: false,
            ports: vec![PortConfig {
                device: "vmk0".to_string(),
            }],
        };
        assert!(config.is_ready());
    }

    #[test]
    fn test_not_ready_without_ports() {
        let config = StorageNetworkConfig {
            enabled: true,
            ports: vec![],
        };
        assert!(!config.is_ready());
    }

    #[test]
    fn test_not_ready_with_empty_device() {
        let config = StorageNetworkConfig {
            enabled: false,
            ports: vec![PortConfig {
                device: String::new(),
            }],
        };
        assert!(!config.is_ready());
    }
}
