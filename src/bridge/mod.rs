//! Backend bridge
//!
//! The UI never talks to account/usage/settings storage directly; it goes
//! through the [`BackendBridge`] port. Requests run as tokio tasks and the
//! results come back to the frame loop as [`BridgeEvent`]s over a crossbeam
//! channel. Errors cross the boundary as opaque display strings.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::Arc;

use crate::models::{Account, AppSettings, UsageDisplay};

pub use memory::MemoryBridge;

/// Port to the external account/usage/settings collaborator
#[async_trait]
pub trait BackendBridge: Send + Sync {
    /// All known accounts
    async fn list_accounts(&self) -> Result<Vec<Account>>;

    /// Id of the currently active account, if any
    async fn current_account(&self) -> Result<Option<String>>;

    /// Make the given account current
    async fn switch_account(&self, id: &str) -> Result<()>;

    /// Fetch a fresh usage snapshot for the given account
    async fn fetch_usage(&self, account_id: &str) -> Result<UsageDisplay>;

    /// Export account data; returns the path of the written file
    async fn export_accounts(&self) -> Result<String>;

    /// Read the persisted settings record
    async fn get_settings(&self) -> Result<AppSettings>;

    /// Persist the given settings record in full
    async fn update_settings(&self, settings: AppSettings) -> Result<()>;
}

/// Responses delivered back to the UI thread
#[derive(Debug, Clone)]
pub enum BridgeEvent {
    Accounts(Result<Vec<Account>, String>),
    CurrentAccount(Result<Option<String>, String>),
    /// Carries the id that was switched to on success
    Switched(Result<String, String>),
    Usage(Result<UsageDisplay, String>),
    /// Carries the export file path on success
    Exported(Result<String, String>),
    SettingsLoaded(Result<AppSettings, String>),
    SettingsSaved(Result<(), String>),
}

/// UI-side handle that turns bridge calls into fire-and-forget tasks
///
/// There is no cancellation: a request in flight cannot be aborted, and
/// overlapping requests are only prevented by disabled buttons in the views.
#[derive(Clone)]
pub struct BridgeHandle {
    bridge: Arc<dyn BackendBridge>,
    runtime: tokio::runtime::Handle,
    tx: Sender<BridgeEvent>,
    ctx: egui::Context,
}

impl BridgeHandle {
    pub fn new(
        bridge: Arc<dyn BackendBridge>,
        runtime: tokio::runtime::Handle,
        ctx: egui::Context,
    ) -> (Self, Receiver<BridgeEvent>) {
        let (tx, rx) = unbounded();
        (
            Self {
                bridge,
                runtime,
                tx,
                ctx,
            },
            rx,
        )
    }

    fn deliver(tx: &Sender<BridgeEvent>, ctx: &egui::Context, event: BridgeEvent) {
        let _ = tx.send(event);
        ctx.request_repaint();
    }

    pub fn request_accounts(&self) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge.list_accounts().await.map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::Accounts(result));
        });
    }

    pub fn request_current_account(&self) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge.current_account().await.map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::CurrentAccount(result));
        });
    }

    pub fn switch_account(&self, id: String) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge
                .switch_account(&id)
                .await
                .map(|_| id)
                .map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::Switched(result));
        });
    }

    pub fn refresh_usage(&self, account_id: String) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge
                .fetch_usage(&account_id)
                .await
                .map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::Usage(result));
        });
    }

    pub fn export_accounts(&self) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge.export_accounts().await.map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::Exported(result));
        });
    }

    pub fn load_settings(&self) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge.get_settings().await.map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::SettingsLoaded(result));
        });
    }

    pub fn save_settings(&self, settings: AppSettings) {
        let (bridge, tx, ctx) = (self.bridge.clone(), self.tx.clone(), self.ctx.clone());
        self.runtime.spawn(async move {
            let result = bridge
                .update_settings(settings)
                .await
                .map_err(|e| e.to_string());
            Self::deliver(&tx, &ctx, BridgeEvent::SettingsSaved(result));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn handle_delivers_settings_over_channel() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let bridge = Arc::new(MemoryBridge::default());
        let (handle, rx) =
            BridgeHandle::new(bridge, runtime.handle().clone(), egui::Context::default());

        handle.load_settings();

        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            BridgeEvent::SettingsLoaded(Ok(settings)) => {
                assert_eq!(settings, AppSettings::default());
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn handle_renders_errors_as_strings() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let bridge = Arc::new(MemoryBridge::default());
        bridge.fail_next_update("磁盘写入失败");
        let (handle, rx) = BridgeHandle::new(
            bridge,
            runtime.handle().clone(),
            egui::Context::default(),
        );

        handle.save_settings(AppSettings::default());

        match rx.recv_timeout(Duration::from_secs(2)).unwrap() {
            BridgeEvent::SettingsSaved(Err(text)) => {
                assert!(text.contains("磁盘写入失败"));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
