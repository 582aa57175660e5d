//! Management-plane REST API client.
//!
//! This crate provides a type-safe client for driving host lifecycle
//! operations against a virtualization management plane: inventory lookup,
//! maintenance-mode transitions, cluster membership changes, and
//! storage-network reconfiguration. Every mutation is asynchronous on the
//! server side; the [`watch`] module drives submitted tasks to completion.

mod auth;
pub mod cancel;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod fingerprint;
pub mod models;
pub mod watch;

pub use auth::SessionManager;
pub use cancel::CancelToken;
pub use client::{ClusterInventory, DatacenterInventory, HostInventory, VirtClient,
    VirtClientBuilder};
pub use error::{ClientError, Result};
pub use models::{
    Cluster, Datacenter, Host, HostConnectSpec, HostConnectionState, PortConfig,
    StorageNetworkConfig, TaskState, TaskStatus, VirtualNic, Vm,
};
pub use watch::{WatchOptions, watch};
