//! Dashboard application entry point

use std::sync::Arc;
use std::time::Instant;

use crossbeam_channel::Receiver;
use eframe::egui;
use parking_lot::RwLock;

use crate::bridge::{BridgeEvent, BridgeHandle};
use crate::dashboard::components::render_sidebar;
use crate::dashboard::state::{DashboardState, DashboardView};
use crate::dashboard::theme;
use crate::dashboard::views::{
    render_accounts_view, render_overview_view, render_settings_view, AccountsAction,
    OverviewAction, SettingsAction,
};
use crate::shared::SharedAppState;

/// The main dashboard application
pub struct DashboardApp {
    /// Shared application state
    shared_state: Arc<RwLock<SharedAppState>>,
    /// Dashboard-specific state
    dashboard_state: DashboardState,
    /// Handle to the backend bridge
    bridge: BridgeHandle,
    /// Responses from bridge tasks
    events: Receiver<BridgeEvent>,
    /// Whether theme has been applied
    theme_applied: bool,
    /// View rendered on the previous frame (for on-enter hooks)
    last_view: DashboardView,
}

impl DashboardApp {
    /// Create the application and issue the initial bridge requests
    pub fn new(
        shared_state: Arc<RwLock<SharedAppState>>,
        bridge: BridgeHandle,
        events: Receiver<BridgeEvent>,
    ) -> Self {
        bridge.request_accounts();
        bridge.request_current_account();

        Self {
            shared_state,
            dashboard_state: DashboardState::default(),
            bridge,
            events,
            theme_applied: false,
            last_view: DashboardView::Overview,
        }
    }

    /// Create eframe options for the dashboard window
    pub fn options() -> eframe::NativeOptions {
        eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1100.0, 700.0])
                .with_min_inner_size([800.0, 500.0])
                .with_title("QuotaSwitch"),
            ..Default::default()
        }
    }

    /// Drain responses that bridge tasks delivered since the last frame
    fn drain_bridge_events(&mut self) {
        let events: Vec<BridgeEvent> = self.events.try_iter().collect();
        for event in events {
            self.handle_bridge_event(event);
        }
    }

    fn handle_bridge_event(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::Accounts(Ok(accounts)) => {
                self.shared_state.write().accounts = accounts;
            }
            BridgeEvent::Accounts(Err(e)) => {
                self.shared_state.write().runtime.set_error(e);
            }
            BridgeEvent::CurrentAccount(Ok(id)) => {
                let mut state = self.shared_state.write();
                state.current_account_id = id.clone();
                if let Some(id) = id {
                    state.runtime.usage_loading = true;
                    drop(state);
                    self.bridge.refresh_usage(id);
                }
            }
            BridgeEvent::CurrentAccount(Err(e)) => {
                self.shared_state.write().runtime.set_error(e);
            }
            BridgeEvent::Switched(Ok(id)) => {
                let mut state = self.shared_state.write();
                state.current_account_id = Some(id.clone());
                let name = state
                    .current_account()
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| id.clone());
                state.runtime.status = Some(format!("已切换到 {name}"));
                state.runtime.clear_error();
                state.runtime.usage_loading = true;
                state.usage = None;
                drop(state);
                self.bridge.refresh_usage(id);
            }
            BridgeEvent::Switched(Err(e)) => {
                self.shared_state
                    .write()
                    .runtime
                    .set_error(format!("切换账号失败: {e}"));
            }
            BridgeEvent::Usage(Ok(usage)) => {
                let mut state = self.shared_state.write();
                state.usage = Some(usage);
                state.runtime.usage_error = None;
                state.runtime.usage_loading = false;
            }
            BridgeEvent::Usage(Err(e)) => {
                let mut state = self.shared_state.write();
                state.runtime.usage_error = Some(e);
                state.runtime.usage_loading = false;
            }
            BridgeEvent::Exported(Ok(path)) => {
                self.shared_state.write().runtime.status = Some(format!("已导出账号数据: {path}"));
            }
            BridgeEvent::Exported(Err(e)) => {
                self.shared_state
                    .write()
                    .runtime
                    .set_error(format!("导出失败: {e}"));
            }
            BridgeEvent::SettingsLoaded(result) => {
                self.dashboard_state.settings.on_loaded(result);
            }
            BridgeEvent::SettingsSaved(result) => {
                self.dashboard_state
                    .settings
                    .on_saved(result, Instant::now());
            }
        }
    }

    /// Re-load settings every time the view is entered, matching the
    /// load-on-mount behavior of the settings panel.
    fn handle_view_transitions(&mut self) {
        let view = self.dashboard_state.current_view;
        if view != self.last_view {
            if view == DashboardView::Settings {
                self.dashboard_state.settings.begin_load();
                self.bridge.load_settings();
            }
            self.last_view = view;
        }
    }

    fn handle_overview_action(&mut self, action: OverviewAction) {
        match action {
            OverviewAction::Switch(id) => self.bridge.switch_account(id),
            OverviewAction::RefreshUsage => {
                let current = {
                    let mut state = self.shared_state.write();
                    state.runtime.usage_error = None;
                    state.current_account_id.clone()
                };
                if let Some(id) = current {
                    self.shared_state.write().runtime.usage_loading = true;
                    self.bridge.refresh_usage(id);
                }
            }
            OverviewAction::OpenAccounts => {
                self.dashboard_state.current_view = DashboardView::Accounts;
            }
            OverviewAction::Export => self.bridge.export_accounts(),
        }
    }

    fn handle_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::Save => {
                let settings = &mut self.dashboard_state.settings;
                settings.begin_save();
                self.bridge.save_settings(settings.draft.clone());
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Apply theme once
        if !self.theme_applied {
            theme::apply_theme(ctx);
            self.theme_applied = true;
        }

        self.drain_bridge_events();
        self.handle_view_transitions();

        // Keep repainting while a banner counts down toward expiry.
        if let Some(remaining) = self.dashboard_state.settings.tick(Instant::now()) {
            ctx.request_repaint_after(remaining);
        }

        egui::SidePanel::left("sidebar")
            .resizable(false)
            .default_width(180.0)
            .show(ctx, |ui| {
                render_sidebar(ui, &mut self.dashboard_state.current_view);
            });

        let mut overview_action = None;
        let mut accounts_action = None;
        let mut settings_action = None;
        let current_view = self.dashboard_state.current_view;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none().inner_margin(24.0).show(ui, |ui| {
                match current_view {
                    DashboardView::Overview => {
                        let shared = self.shared_state.read();
                        overview_action = render_overview_view(ui, &shared);
                    }
                    DashboardView::Accounts => {
                        let shared = self.shared_state.read();
                        accounts_action = render_accounts_view(ui, &shared);
                    }
                    DashboardView::Settings => {
                        settings_action =
                            render_settings_view(ui, &mut self.dashboard_state.settings);
                    }
                }
            });
        });

        if let Some(action) = overview_action {
            self.handle_overview_action(action);
        }
        if let Some(AccountsAction::Switch(id)) = accounts_action {
            self.bridge.switch_account(id);
        }
        if let Some(action) = settings_action {
            self.handle_settings_action(action);
        }
    }
}
