//! REST API endpoint implementations.

mod auth;
mod clusters;
mod hosts;
mod inventory;
mod network;
mod request;
pub mod tasks;

pub use auth::{login, logout};
pub use clusters::{add_host, move_host_into};
pub use hosts::{MaintenanceAction, list_vnics, remove_host, set_maintenance_mode};
pub use inventory::{list_clusters, list_datacenters, list_hosts, list_vms};
pub use network::{get_storage_network, update_storage_network};
pub use request::send_request_with_retry;
pub use tasks::{get_task, wait_for_task};
