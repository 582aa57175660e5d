//! Inventory models: datacenters, clusters, hosts, and VMs.
//!
//! All of these objects are owned and mutated by the management plane; the
//! client reads them and addresses them by name or IP.

use serde::{Deserialize, Serialize};

/// A datacenter in the inventory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datacenter {
    pub id: String,
    pub name: String,
}

/// A cluster under a datacenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cluster {
    pub id: String,
    pub name: String,
}

/// Connection state of a host, as reported by the management plane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostConnectionState {
    Connected,
    Disconnected,
    NotResponding,
}

/// A host under a cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: String,
    /// DNS name or IP address, depending on how the host was added.
    pub name: String,
    pub connection_state: HostConnectionState,
    /// True while the host is evacuated for structural changes.
    #[serde(default)]
    pub in_maintenance: bool,
}

/// A virtual machine placed on a host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vm {
    pub id: String,
    pub name: String,
}

/// Connect spec submitted when adding a standalone host to a cluster.
#[derive(Debug, Serialize)]
pub struct HostConnectSpec {
    /// DNS name or IP address of the host.
    pub host_name: String,
    pub port: u16,
    /// SHA-1 thumbprint of the host's certificate, 20 colon-separated
    /// hex byte-pairs.
    pub ssl_thumbprint: String,
    /// Administration account on the host.
    pub username: String,
    pub password: String,
    /// Whether to take over the host if another manager already claims it.
    pub force: bool,
    /// Connect the host immediately after adding it.
    pub as_connected: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_deserializes_connection_state() {
        let json = r#"{
            "id": "host-12",
            "name": "esxi-01.lab.local",
            "connection_state": "CONNECTED",
            "in_maintenance": true
        }"#;
        let host: Host = serde_json::from_str(json).unwrap();
        assert_eq!(host.connection_state, HostConnectionState::Connected);
        assert!(host.in_maintenance);
    }

    #[test]
    fn test_host_maintenance_defaults_to_false() {
        let json = r#"{"id": "host-1", "name": "esxi-02", "connection_state": "DISCONNECTED"}"#;
        let host: Host = serde_json::from_str(json).unwrap();
        assert!(!host.in_maintenance);
    }

    #[test]
    fn test_connect_spec_serializes_thumbprint() {
        let spec = HostConnectSpec {
            host_name: "10.0.0.12".to_string(),
            port: 443,
            ssl_thumbprint: "AA:BB".to_string(),
            username: "root".to_string(),
            password: "pw".to_string(),
            force: false,
            as_connected: true,
        };
        let json = serde_json::to_value(&spec).unwrap();
        assert_eq!(json["host_name"], "10.0.0.12");
        assert_eq!(json["ssl_thumbprint"], "AA:BB");
        assert_eq!(json["as_connected"], true);
    }
}
