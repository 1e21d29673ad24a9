//! Display-oriented value types shared by the views
//!
//! These records are owned by the backend bridge; the UI only renders them
//! and requests replacements.

use egui::Color32;
use serde::{Deserialize, Serialize};

use crate::dashboard::theme::ThemeColors;

/// An account known to the backend store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    /// Stable identifier
    pub id: String,
    /// Display name (email-like string)
    pub name: String,
    /// Whether the stored authorization for this account has expired
    #[serde(default)]
    pub invalid: bool,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            invalid: false,
        }
    }
}

/// Snapshot of quota figures for one account
///
/// Refreshed wholesale by the backend; never mutated by the UI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageDisplay {
    /// Remaining percentage of the rolling 5-hour window
    pub five_hour_left: u8,
    /// Remaining percentage of the weekly window
    pub weekly_left: u8,
    /// Plan type string, if the backend reports one
    pub plan_type: Option<String>,
    /// Whether this account type exposes a credit balance
    pub has_credits: bool,
    /// Credit balance in dollars
    pub credits_balance: Option<f64>,
}

/// Application preferences, loaded once and persisted in full on save
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppSettings {
    /// Reload the IDE automatically after switching accounts
    pub auto_reload_ide: bool,
    /// Which IDE to reload
    pub primary_ide: String,
    /// Restart via pkill instead of graceful reload
    pub use_pkill_restart: bool,
    /// Background quota refresh (always on, not user-configurable)
    pub background_refresh: bool,
    /// Background refresh interval in minutes
    pub refresh_interval_minutes: u32,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            auto_reload_ide: false,
            primary_ide: "Windsurf".to_string(),
            use_pkill_restart: false,
            background_refresh: true,
            refresh_interval_minutes: 30,
        }
    }
}

/// Selectable IDEs for the reload setting: (stored value, display label)
pub const IDE_OPTIONS: [(&str, &str); 4] = [
    ("Windsurf", "Windsurf"),
    ("Antigravity", "Antigravity"),
    ("Cursor", "Cursor"),
    ("VSCode", "VS Code"),
];

/// Threshold-based styling level for a quota percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaLevel {
    Sufficient,
    Low,
}

impl QuotaLevel {
    /// A quota is sufficient only when strictly above 50 percent
    pub fn from_percent(value: u8) -> Self {
        if value > 50 {
            QuotaLevel::Sufficient
        } else {
            QuotaLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuotaLevel::Sufficient => "配额充足",
            QuotaLevel::Low => "配额偏低",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            QuotaLevel::Sufficient => ThemeColors::ACCENT_SUCCESS,
            QuotaLevel::Low => ThemeColors::ACCENT_WARNING,
        }
    }
}

/// Pick the recommended account: the first one that is not current.
///
/// TODO: rank by remaining quota once per-account usage snapshots are
/// plumbed through the bridge; today this just returns the first other
/// account and the card shows a hardcoded 100% badge.
pub fn recommended_account<'a>(
    accounts: &'a [Account],
    current_id: Option<&str>,
) -> Option<&'a Account> {
    accounts.iter().find(|a| Some(a.id.as_str()) != current_id)
}

/// Greeting name: local part of the email, or a generic fallback
pub fn greeting_name(current: Option<&Account>) -> String {
    current
        .and_then(|a| a.name.split('@').next())
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| "用户".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accounts(names: &[&str]) -> Vec<Account> {
        names
            .iter()
            .map(|n| Account::new(format!("id-{n}"), format!("{n}@example.com")))
            .collect()
    }

    #[test]
    fn quota_level_boundary_is_exclusive_at_50() {
        assert_eq!(QuotaLevel::from_percent(50), QuotaLevel::Low);
        assert_eq!(QuotaLevel::from_percent(51), QuotaLevel::Sufficient);
        assert_eq!(QuotaLevel::from_percent(0), QuotaLevel::Low);
        assert_eq!(QuotaLevel::from_percent(100), QuotaLevel::Sufficient);
    }

    #[test]
    fn no_recommendation_for_empty_list() {
        assert!(recommended_account(&[], None).is_none());
    }

    #[test]
    fn no_recommendation_when_only_account_is_current() {
        let list = accounts(&["alice"]);
        assert!(recommended_account(&list, Some("id-alice")).is_none());
    }

    #[test]
    fn recommendation_is_first_non_current() {
        let list = accounts(&["alice", "bob", "carol"]);
        let best = recommended_account(&list, Some("id-alice")).unwrap();
        assert_eq!(best.id, "id-bob");

        // Current account in the middle: still the first *other* one.
        let best = recommended_account(&list, Some("id-bob")).unwrap();
        assert_eq!(best.id, "id-alice");
    }

    #[test]
    fn recommendation_without_current_account() {
        let list = accounts(&["alice", "bob"]);
        let best = recommended_account(&list, None).unwrap();
        assert_eq!(best.id, "id-alice");
    }

    #[test]
    fn greeting_uses_email_local_part() {
        let list = accounts(&["alice"]);
        assert_eq!(greeting_name(list.first()), "alice");
        assert_eq!(greeting_name(None), "用户");
        // Degenerate name starting with '@' falls back too.
        let odd = Account::new("x", "@example.com");
        assert_eq!(greeting_name(Some(&odd)), "用户");
    }

    #[test]
    fn settings_defaults() {
        let s = AppSettings::default();
        assert!(!s.auto_reload_ide);
        assert_eq!(s.primary_ide, "Windsurf");
        assert!(!s.use_pkill_restart);
        assert!(s.background_refresh);
        assert_eq!(s.refresh_interval_minutes, 30);
    }
}
