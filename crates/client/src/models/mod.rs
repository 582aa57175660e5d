//! Data models for the management-plane REST API.

mod inventory;
mod network;
mod tasks;

pub use inventory::{Cluster, Datacenter, Host, HostConnectSpec, HostConnectionState, Vm};
pub use network::{PortConfig, StorageNetworkConfig, VirtualNic};
pub use tasks::{TaskState, TaskStatus, TaskSubmitted};
