//! Overview view - greeting, stats, current account and recommendation
//!
//! Pure function of the shared state; every mutating intent is returned as
//! an [`OverviewAction`] for the app shell to execute.

use egui::{Color32, RichText, Rounding};

use crate::dashboard::components::{render_stats_bar, render_usage_card};
use crate::dashboard::theme::{color_with_alpha, ThemeColors};
use crate::models::{greeting_name, recommended_account};
use crate::shared::SharedAppState;

/// User intent raised from the overview
#[derive(Debug, Clone, PartialEq)]
pub enum OverviewAction {
    /// Switch to the given account
    Switch(String),
    /// Re-fetch the usage snapshot for the current account
    RefreshUsage,
    /// Navigate to the accounts view
    OpenAccounts,
    /// Export account data
    Export,
}

/// Render the overview view
pub fn render_overview_view(ui: &mut egui::Ui, shared: &SharedAppState) -> Option<OverviewAction> {
    let mut action = None;

    ui.heading(
        RichText::new(format!(
            "你好, {} 👋",
            greeting_name(shared.current_account())
        ))
        .size(24.0)
        .strong(),
    );

    ui.add_space(16.0);

    render_stats_bar(ui, shared.accounts.len(), shared.usage.as_ref());

    ui.add_space(24.0);

    ui.columns(2, |cols| {
        if let Some(a) = render_current_account_card(&mut cols[0], shared) {
            action = Some(a);
        }
        if let Some(a) = render_recommendation_card(&mut cols[1], shared) {
            action = Some(a);
        }
    });

    ui.add_space(16.0);

    ui.horizontal(|ui| {
        if link_card(ui, "查看所有账号", "→") {
            action = Some(OverviewAction::OpenAccounts);
        }
        ui.add_space(8.0);
        if link_card(ui, "导出账号数据", "↓") {
            action = Some(OverviewAction::Export);
        }
    });

    if let Some(status) = &shared.runtime.status {
        ui.add_space(12.0);
        ui.label(
            RichText::new(status)
                .size(12.0)
                .color(ThemeColors::TEXT_MUTED),
        );
    }

    if let Some(error) = &shared.runtime.last_error {
        ui.add_space(12.0);
        egui::Frame::none()
            .fill(color_with_alpha(ThemeColors::ACCENT_ERROR, 51))
            .rounding(Rounding::same(6.0))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new(error).color(ThemeColors::TEXT_PRIMARY));
            });
    }

    action
}

/// Current account card, with the invalid-authorization warning state
fn render_current_account_card(
    ui: &mut egui::Ui,
    shared: &SharedAppState,
) -> Option<OverviewAction> {
    let mut action = None;

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("✓").color(ThemeColors::ACCENT_SUCCESS));
                ui.heading(RichText::new("当前账号").size(16.0));
                if shared.current_is_invalid() {
                    ui.label(
                        RichText::new("⚠️ 失效")
                            .size(12.0)
                            .color(ThemeColors::ACCENT_WARNING),
                    )
                    .on_hover_text("授权已失效，请删除后重新登录");
                }
            });

            ui.add_space(12.0);

            match shared.current_account() {
                Some(account) => {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new("✉").color(ThemeColors::TEXT_MUTED));
                        ui.label(
                            RichText::new(&account.name)
                                .size(14.0)
                                .color(ThemeColors::TEXT_PRIMARY),
                        );
                        if let Some(plan) = shared.usage.as_ref().and_then(|u| u.plan_type.as_ref())
                        {
                            badge(ui, &plan.to_uppercase(), ThemeColors::ACCENT_PRIMARY);
                        }
                    });

                    ui.add_space(8.0);

                    if render_usage_card(
                        ui,
                        shared.usage.as_ref(),
                        shared.runtime.usage_loading,
                        shared.runtime.usage_error.as_deref(),
                    ) {
                        action = Some(OverviewAction::RefreshUsage);
                    }

                    ui.add_space(8.0);

                    let button = egui::Button::new("切换账号")
                        .min_size(egui::vec2(ui.available_width(), 32.0));
                    if ui.add(button).clicked() {
                        action = Some(OverviewAction::OpenAccounts);
                    }
                }
                None => {
                    ui.label(
                        RichText::new("暂无账号")
                            .size(13.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                }
            }
        });

    action
}

/// Recommendation card: first non-current account, hardcoded 100% badge
fn render_recommendation_card(
    ui: &mut egui::Ui,
    shared: &SharedAppState,
) -> Option<OverviewAction> {
    let mut action = None;
    let best = recommended_account(&shared.accounts, shared.current_account_id.as_deref());

    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("↗").color(ThemeColors::ACCENT_PRIMARY));
                ui.heading(RichText::new("最佳账号推荐").size(16.0));
            });

            ui.add_space(12.0);

            match best {
                Some(account) => {
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new("推荐账号")
                                    .size(11.0)
                                    .color(ThemeColors::TEXT_MUTED),
                            );
                            ui.label(
                                RichText::new(&account.name)
                                    .size(14.0)
                                    .color(ThemeColors::TEXT_PRIMARY),
                            );
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            badge(ui, "100%", ThemeColors::ACCENT_SUCCESS);
                        });
                    });
                }
                None => {
                    ui.label(
                        RichText::new("暂无推荐")
                            .size(13.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                }
            }

            // The shortcut only exists when there is something to switch to.
            if shared.accounts.len() > 1 {
                ui.add_space(12.0);
                let button = egui::Button::new(RichText::new("一键切换最佳").color(Color32::WHITE))
                    .fill(ThemeColors::ACCENT_PRIMARY)
                    .min_size(egui::vec2(ui.available_width(), 32.0));
                if ui.add(button).clicked() {
                    if let Some(account) = best {
                        action = Some(OverviewAction::Switch(account.id.clone()));
                    }
                }
            }
        });

    action
}

fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::none()
        .fill(color_with_alpha(color, 40))
        .rounding(Rounding::same(4.0))
        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(11.0).color(color).strong());
        });
}

fn link_card(ui: &mut egui::Ui, label: &str, arrow: &str) -> bool {
    ui.add(
        egui::Button::new(format!("{label}  {arrow}")).min_size(egui::vec2(160.0, 36.0)),
    )
    .clicked()
}
