//! In-memory backend bridge
//!
//! Stands in for the real account/usage/settings service: seeds demo data
//! for the binary and gives tests a recording, failure-injectable port.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::path::PathBuf;
use uuid::Uuid;

use super::BackendBridge;
use crate::models::{Account, AppSettings, UsageDisplay};

#[derive(Debug, Default)]
struct MemoryState {
    accounts: Vec<Account>,
    current: Option<String>,
    usage: HashMap<String, UsageDisplay>,
    settings: AppSettings,
    /// Every record passed to `update_settings`, in order
    saved: Vec<AppSettings>,
    /// Error text to return from the next `update_settings` call
    fail_update: Option<String>,
}

/// In-memory [`BackendBridge`] implementation
pub struct MemoryBridge {
    state: Mutex<MemoryState>,
    export_dir: PathBuf,
}

impl Default for MemoryBridge {
    fn default() -> Self {
        Self {
            state: Mutex::new(MemoryState::default()),
            export_dir: std::env::temp_dir(),
        }
    }
}

impl MemoryBridge {
    /// Bridge seeded with a handful of accounts and usage snapshots
    pub fn with_demo_data() -> Self {
        let bridge = Self::default();
        {
            let mut state = bridge.state.lock();

            let alice = Account::new(Uuid::new_v4().to_string(), "alice@example.com");
            let bob = Account::new(Uuid::new_v4().to_string(), "bob@example.com");
            let mut carol = Account::new(Uuid::new_v4().to_string(), "carol@example.com");
            carol.invalid = true;

            state.usage.insert(
                alice.id.clone(),
                UsageDisplay {
                    five_hour_left: 72,
                    weekly_left: 64,
                    plan_type: Some("pro".to_string()),
                    has_credits: true,
                    credits_balance: Some(12.5),
                },
            );
            state.usage.insert(
                bob.id.clone(),
                UsageDisplay {
                    five_hour_left: 38,
                    weekly_left: 91,
                    plan_type: Some("free".to_string()),
                    has_credits: false,
                    credits_balance: None,
                },
            );

            state.current = Some(alice.id.clone());
            state.accounts = vec![alice, bob, carol];
        }
        bridge
    }

    /// Write exports under the given directory instead of the temp dir
    pub fn with_export_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.export_dir = dir.into();
        self
    }

    /// Arm the next `update_settings` call to fail with the given text
    pub fn fail_next_update(&self, error: impl Into<String>) {
        self.state.lock().fail_update = Some(error.into());
    }

    /// Records that `update_settings` received, oldest first
    pub fn saved_settings(&self) -> Vec<AppSettings> {
        self.state.lock().saved.clone()
    }
}

#[async_trait]
impl BackendBridge for MemoryBridge {
    async fn list_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.state.lock().accounts.clone())
    }

    async fn current_account(&self) -> Result<Option<String>> {
        Ok(self.state.lock().current.clone())
    }

    async fn switch_account(&self, id: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.accounts.iter().any(|a| a.id == id) {
            state.current = Some(id.to_string());
            Ok(())
        } else {
            Err(anyhow!("未找到账号: {id}"))
        }
    }

    async fn fetch_usage(&self, account_id: &str) -> Result<UsageDisplay> {
        self.state
            .lock()
            .usage
            .get(account_id)
            .cloned()
            .ok_or_else(|| anyhow!("无法获取配额信息: {account_id}"))
    }

    async fn export_accounts(&self) -> Result<String> {
        let accounts = self.state.lock().accounts.clone();
        let json = serde_json::to_string_pretty(&accounts)?;
        let path = self.export_dir.join("accounts-export.json");
        std::fs::write(&path, json)?;
        Ok(path.display().to_string())
    }

    async fn get_settings(&self) -> Result<AppSettings> {
        Ok(self.state.lock().settings.clone())
    }

    async fn update_settings(&self, settings: AppSettings) -> Result<()> {
        let mut state = self.state.lock();
        if let Some(error) = state.fail_update.take() {
            return Err(anyhow!(error));
        }
        state.settings = settings.clone();
        state.saved.push(settings);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_then_save_round_trips_identical_record() {
        let bridge = MemoryBridge::default();

        let loaded = bridge.get_settings().await.unwrap();
        bridge.update_settings(loaded.clone()).await.unwrap();

        assert_eq!(bridge.saved_settings(), vec![loaded]);
    }

    #[tokio::test]
    async fn switch_rejects_unknown_account() {
        let bridge = MemoryBridge::with_demo_data();
        let err = bridge.switch_account("missing").await.unwrap_err();
        assert!(err.to_string().contains("missing"));

        let accounts = bridge.list_accounts().await.unwrap();
        bridge.switch_account(&accounts[1].id).await.unwrap();
        assert_eq!(
            bridge.current_account().await.unwrap().as_deref(),
            Some(accounts[1].id.as_str())
        );
    }

    #[tokio::test]
    async fn usage_snapshot_is_per_account() {
        let bridge = MemoryBridge::with_demo_data();
        let accounts = bridge.list_accounts().await.unwrap();

        let usage = bridge.fetch_usage(&accounts[0].id).await.unwrap();
        assert_eq!(usage.five_hour_left, 72);
        assert!(usage.has_credits);

        // carol has no snapshot seeded
        assert!(bridge.fetch_usage(&accounts[2].id).await.is_err());
    }

    #[tokio::test]
    async fn export_writes_json_file() {
        let dir = tempfile::tempdir().unwrap();
        let bridge = MemoryBridge::with_demo_data().with_export_dir(dir.path());

        let path = bridge.export_accounts().await.unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<Account> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[tokio::test]
    async fn armed_failure_fires_once() {
        let bridge = MemoryBridge::default();
        bridge.fail_next_update("boom");

        assert!(bridge.update_settings(AppSettings::default()).await.is_err());
        assert!(bridge.update_settings(AppSettings::default()).await.is_ok());
    }
}
