//! Storage-network procedures for [`VirtClient`].
//!
//! # What this module handles:
//! - Checking whether a host's network interface is ready for storage
//!   clustering
//! - Binding the storage-clustering service to a host's VMkernel interface
//!
//! # What this module does NOT handle:
//! - Host membership changes (see [`super::hosts`])

use tracing::info;

use crate::cancel::CancelToken;
use crate::client::VirtClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use crate::models::{Host, PortConfig, StorageNetworkConfig};

impl VirtClient {
    /// Read a host's storage-network configuration.
    pub async fn storage_network(&mut self, host: &Host) -> Result<StorageNetworkConfig> {
        crate::retry_call!(
            self,
            __token,
            endpoints::get_storage_network(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                self.max_retries(),
            )
            .await
        )
    }

    /// True when the host's network interface is ready to connect to a
    /// storage cluster.
    pub async fn is_storage_network_ready(&mut self, host: &Host) -> Result<bool> {
        Ok(self.storage_network(host).await?.is_ready())
    }

    /// Bind the storage-clustering service to the host's first VMkernel
    /// interface and wait for the reconfiguration to complete.
    ///
    /// `enabled` must stay false for a host that has not joined a storage
    /// cluster yet.
    pub async fn configure_storage_network(
        &mut self,
        host: &Host,
        enabled: bool,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let vnics = crate::retry_call!(
            self,
            __token,
            endpoints::list_vnics(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                self.max_retries(),
            )
            .await
        )?;

        let vnic = vnics.first().ok_or_else(|| {
            ClientError::NotFound(format!("VMkernel interface on host '{}'", host.name))
        })?;

        let config = StorageNetworkConfig {
            enabled,
            ports: vec![PortConfig {
                device: vnic.device.clone(),
            }],
        };

        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::update_storage_network(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                &config,
                self.max_retries(),
            )
            .await
        )?;
        self.wait_for_task(&task_id, cancel).await?;

        info!(
            "Host '{}' reconfigured its network for storage clustering (device {})",
            host.name, vnic.device
        );
        Ok(())
    }
}
