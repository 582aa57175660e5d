//! Host lifecycle procedures for [`VirtClient`].
//!
//! # What this module handles:
//! - Maintenance-mode transitions
//! - Moving a managed host between clusters
//! - Adding a standalone host to a cluster
//! - Removing a host from the inventory
//!
//! Each procedure runs its operations strictly in sequence: submit one task,
//! drive it to a terminal state with the watcher, then submit the next.
//! A failed task aborts the whole procedure; nothing is resubmitted.
//!
//! # What this module does NOT handle:
//! - Storage-network configuration (see [`super::network`])

use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::cancel::CancelToken;
use crate::client::VirtClient;
use crate::endpoints::{self, MaintenanceAction};
use crate::error::Result;
use crate::fingerprint;
use crate::models::{Host, HostConnectSpec};

impl VirtClient {
    /// Put a host into maintenance mode, evacuating powered-off VMs, and
    /// wait for the transition to complete.
    pub async fn enter_maintenance_mode(
        &mut self,
        host: &Host,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::set_maintenance_mode(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                MaintenanceAction::Enter,
                self.max_retries(),
            )
            .await
        )?;

        self.wait_for_task(&task_id, cancel).await?;
        info!("Host '{}' entered maintenance mode", host.name);
        Ok(())
    }

    /// Take a host out of maintenance mode and wait for the transition to
    /// complete.
    pub async fn exit_maintenance_mode(
        &mut self,
        host: &Host,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::set_maintenance_mode(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                MaintenanceAction::Exit,
                self.max_retries(),
            )
            .await
        )?;

        self.wait_for_task(&task_id, cancel).await?;
        info!("Host '{}' exited maintenance mode", host.name);
        Ok(())
    }

    /// Move a managed host into another cluster.
    ///
    /// Sequence: enter maintenance mode, move, exit maintenance mode. Each
    /// step is waited on before the next begins.
    pub async fn move_host_to_cluster(
        &mut self,
        host_name: &str,
        cluster_name: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let host = self.find_host(host_name).await?;
        let cluster = self.find_cluster(cluster_name).await?;

        self.enter_maintenance_mode(&host, cancel).await?;

        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::move_host_into(
                self.http(),
                self.base_url(),
                &__token,
                &cluster.id,
                &host.id,
                self.max_retries(),
            )
            .await
        )?;
        self.wait_for_task(&task_id, cancel).await?;
        info!("Host '{}' moved to cluster '{}'", host.name, cluster.name);

        self.exit_maintenance_mode(&host, cancel).await?;
        Ok(())
    }

    /// Add a standalone host to a cluster.
    ///
    /// Retrieves the host's TLS thumbprint in-process, submits the connect
    /// spec, waits for the add to complete, re-resolves the host from the
    /// inventory, and configures its storage network if it is not ready
    /// (storage clustering stays disabled until the host joins a storage
    /// cluster).
    pub async fn add_host_to_cluster(
        &mut self,
        host_address: &str,
        host_port: u16,
        host_username: &str,
        host_password: &SecretString,
        cluster_name: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<Host> {
        let cluster = self.find_cluster(cluster_name).await?;

        let thumbprint = fingerprint::host_thumbprint(host_address, host_port).await?;
        let spec = HostConnectSpec {
            host_name: host_address.to_string(),
            port: host_port,
            ssl_thumbprint: thumbprint,
            username: host_username.to_string(),
            password: host_password.expose_secret().to_string(),
            force: false,
            as_connected: true,
        };

        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::add_host(
                self.http(),
                self.base_url(),
                &__token,
                &cluster.id,
                &spec,
                self.max_retries(),
            )
            .await
        )?;
        self.wait_for_task(&task_id, cancel).await?;

        // The add task succeeding is not enough: confirm the host actually
        // landed in the inventory before touching its network.
        let host = self.find_host(host_address).await?;
        info!("Host '{}' added to cluster '{}'", host.name, cluster.name);

        if !self.is_storage_network_ready(&host).await? {
            self.configure_storage_network(&host, false, cancel).await?;
        }

        Ok(host)
    }

    /// Remove a host from the inventory.
    ///
    /// The host is put into maintenance mode first, mirroring the move flow's
    /// evacuation-before-structural-change sequence.
    pub async fn remove_host(
        &mut self,
        host_name: &str,
        cancel: Option<&CancelToken>,
    ) -> Result<()> {
        let host = self.find_host(host_name).await?;

        self.enter_maintenance_mode(&host, cancel).await?;

        let task_id = crate::retry_call!(
            self,
            __token,
            endpoints::remove_host(
                self.http(),
                self.base_url(),
                &__token,
                &host.id,
                self.max_retries(),
            )
            .await
        )?;
        self.wait_for_task(&task_id, cancel).await?;
        info!("Host '{}' removed from inventory", host.name);
        Ok(())
    }
}
