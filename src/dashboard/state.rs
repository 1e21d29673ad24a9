//! Dashboard view state management

use std::time::{Duration, Instant};

use crate::models::AppSettings;

/// How long a settings banner stays on screen
pub const MESSAGE_TTL: Duration = Duration::from_secs(3);

/// Current view in the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DashboardView {
    #[default]
    Overview,
    Accounts,
    Settings,
}

impl DashboardView {
    /// Get the display name for this view
    pub fn name(&self) -> &'static str {
        match self {
            DashboardView::Overview => "总览",
            DashboardView::Accounts => "账号",
            DashboardView::Settings => "设置",
        }
    }

    /// Get the icon character for this view
    pub fn icon(&self) -> &'static str {
        match self {
            DashboardView::Overview => "◉",
            DashboardView::Accounts => "@",
            DashboardView::Settings => "⚙",
        }
    }
}

/// Overall dashboard state
#[derive(Debug, Default)]
pub struct DashboardState {
    /// Current active view
    pub current_view: DashboardView,
    /// Settings view state
    pub settings: SettingsViewState,
}

/// Lifecycle of the settings view
///
/// A single union instead of independent booleans, so a save in flight can
/// never coexist with a stale banner.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SettingsPhase {
    #[default]
    Idle,
    /// Initial load request in flight; the form renders defaults meanwhile
    Loading,
    /// Save request in flight; the save button is disabled
    Saving,
    /// Transient banner after a save attempt
    Message { text: String, shown_at: Instant },
}

/// Settings view state: the editable draft plus its load/save lifecycle
#[derive(Debug)]
pub struct SettingsViewState {
    /// Locally held, not-yet-persisted copy of the settings
    pub draft: AppSettings,
    /// Raw text of the refresh-interval field
    pub interval_text: String,
    pub phase: SettingsPhase,
}

impl Default for SettingsViewState {
    fn default() -> Self {
        let draft = AppSettings::default();
        Self {
            interval_text: draft.refresh_interval_minutes.to_string(),
            draft,
            phase: SettingsPhase::Idle,
        }
    }
}

impl SettingsViewState {
    pub fn begin_load(&mut self) {
        self.phase = SettingsPhase::Loading;
    }

    /// Load responses replace the draft; failures only reach the log and
    /// the previous draft stays in place.
    pub fn on_loaded(&mut self, result: Result<AppSettings, String>) {
        match result {
            Ok(settings) => {
                self.interval_text = settings.refresh_interval_minutes.to_string();
                self.draft = settings;
            }
            Err(e) => {
                tracing::error!("加载设置失败: {e}");
            }
        }
        if self.phase == SettingsPhase::Loading {
            self.phase = SettingsPhase::Idle;
        }
    }

    pub fn begin_save(&mut self) {
        self.phase = SettingsPhase::Saving;
    }

    /// Either outcome clears the saving state and shows a banner; failures
    /// interpolate the raw error text.
    pub fn on_saved(&mut self, result: Result<(), String>, now: Instant) {
        let text = match result {
            Ok(()) => "✅ 设置已保存".to_string(),
            Err(e) => format!("❌ 保存失败: {e}"),
        };
        self.phase = SettingsPhase::Message {
            text,
            shown_at: now,
        };
    }

    /// Expire a stale banner. Returns the remaining banner lifetime while
    /// one is showing, so the caller can schedule a repaint.
    pub fn tick(&mut self, now: Instant) -> Option<Duration> {
        if let SettingsPhase::Message { shown_at, .. } = &self.phase {
            let elapsed = now.saturating_duration_since(*shown_at);
            if elapsed >= MESSAGE_TTL {
                self.phase = SettingsPhase::Idle;
                return None;
            }
            return Some(MESSAGE_TTL - elapsed);
        }
        None
    }

    pub fn is_saving(&self) -> bool {
        self.phase == SettingsPhase::Saving
    }

    pub fn message(&self) -> Option<&str> {
        match &self.phase {
            SettingsPhase::Message { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Re-parse the interval field into the draft
    pub fn apply_interval_text(&mut self) {
        self.draft.refresh_interval_minutes = parse_refresh_interval(&self.interval_text);
    }
}

/// Parse a refresh interval entered as text: fall back to 30 when the text
/// is not a number, then clamp to the widget bounds 5..=120.
pub fn parse_refresh_interval(text: &str) -> u32 {
    text.trim().parse::<u32>().unwrap_or(30).clamp(5, 120)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_parsing_falls_back_to_30() {
        assert_eq!(parse_refresh_interval("45"), 45);
        assert_eq!(parse_refresh_interval("abc"), 30);
        assert_eq!(parse_refresh_interval(""), 30);
        assert_eq!(parse_refresh_interval(" 60 "), 60);
    }

    #[test]
    fn interval_parsing_clamps_to_widget_bounds() {
        assert_eq!(parse_refresh_interval("200"), 120);
        assert_eq!(parse_refresh_interval("1"), 5);
        assert_eq!(parse_refresh_interval("5"), 5);
        assert_eq!(parse_refresh_interval("120"), 120);
    }

    #[test]
    fn load_success_replaces_draft_and_interval_text() {
        let mut state = SettingsViewState::default();
        state.begin_load();

        let mut settings = AppSettings::default();
        settings.refresh_interval_minutes = 45;
        settings.auto_reload_ide = true;
        state.on_loaded(Ok(settings.clone()));

        assert_eq!(state.draft, settings);
        assert_eq!(state.interval_text, "45");
        assert_eq!(state.phase, SettingsPhase::Idle);
    }

    #[test]
    fn load_failure_keeps_previous_draft() {
        let mut state = SettingsViewState::default();
        let before = state.draft.clone();
        state.begin_load();
        state.on_loaded(Err("后端不可用".to_string()));

        assert_eq!(state.draft, before);
        assert_eq!(state.phase, SettingsPhase::Idle);
    }

    #[test]
    fn save_failure_shows_literal_error_and_clears_saving() {
        let mut state = SettingsViewState::default();
        state.begin_save();
        assert!(state.is_saving());

        state.on_saved(Err("磁盘写入失败".to_string()), Instant::now());

        assert!(!state.is_saving());
        let banner = state.message().unwrap();
        assert!(banner.contains("磁盘写入失败"));
        assert!(banner.starts_with("❌ 保存失败:"));
    }

    #[test]
    fn save_success_banner_expires_after_ttl() {
        let mut state = SettingsViewState::default();
        let start = Instant::now();
        state.begin_save();
        state.on_saved(Ok(()), start);
        assert_eq!(state.message(), Some("✅ 设置已保存"));

        // Still visible just under the TTL.
        assert!(state
            .tick(start + MESSAGE_TTL - Duration::from_millis(1))
            .is_some());
        assert!(state.message().is_some());

        // Gone at the TTL.
        assert!(state.tick(start + MESSAGE_TTL).is_none());
        assert_eq!(state.phase, SettingsPhase::Idle);
    }

    #[test]
    fn hiding_dependent_fields_keeps_their_values() {
        let mut state = SettingsViewState::default();
        state.draft.auto_reload_ide = true;
        state.draft.primary_ide = "Cursor".to_string();
        state.draft.use_pkill_restart = true;

        // Toggling off only hides the fields in the view; nothing resets.
        state.draft.auto_reload_ide = false;
        assert_eq!(state.draft.primary_ide, "Cursor");
        assert!(state.draft.use_pkill_restart);

        state.draft.auto_reload_ide = true;
        assert_eq!(state.draft.primary_ide, "Cursor");
        assert!(state.draft.use_pkill_restart);
    }

    #[test]
    fn interval_text_feeds_draft_through_parser() {
        let mut state = SettingsViewState::default();
        state.interval_text = "45".to_string();
        state.apply_interval_text();
        assert_eq!(state.draft.refresh_interval_minutes, 45);

        state.interval_text = "not a number".to_string();
        state.apply_interval_text();
        assert_eq!(state.draft.refresh_interval_minutes, 30);
    }
}
