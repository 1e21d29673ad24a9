//! Accounts view - the full account list with per-account switching

use egui::{RichText, Rounding};

use crate::dashboard::theme::ThemeColors;
use crate::shared::SharedAppState;

/// User intent raised from the accounts view
#[derive(Debug, Clone, PartialEq)]
pub enum AccountsAction {
    /// Switch to the given account
    Switch(String),
}

/// Render the accounts view
pub fn render_accounts_view(ui: &mut egui::Ui, shared: &SharedAppState) -> Option<AccountsAction> {
    let mut action = None;

    ui.heading(RichText::new("账号").size(24.0).strong());
    ui.add_space(8.0);
    ui.label(
        RichText::new("管理所有已登录账号，点击切换立即生效")
            .size(14.0)
            .color(ThemeColors::TEXT_SECONDARY),
    );

    ui.add_space(24.0);

    if shared.accounts.is_empty() {
        ui.label(
            RichText::new("暂无账号")
                .size(13.0)
                .color(ThemeColors::TEXT_MUTED),
        );
        return None;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for account in &shared.accounts {
            let is_current = shared.current_account_id.as_deref() == Some(account.id.as_str());

            egui::Frame::none()
                .fill(ThemeColors::BG_MEDIUM)
                .rounding(Rounding::same(8.0))
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            RichText::new(&account.name)
                                .size(14.0)
                                .color(ThemeColors::TEXT_PRIMARY),
                        );

                        if is_current {
                            ui.label(
                                RichText::new("当前")
                                    .size(11.0)
                                    .color(ThemeColors::ACCENT_PRIMARY),
                            );
                        }
                        if account.invalid {
                            ui.label(
                                RichText::new("⚠️ 失效")
                                    .size(11.0)
                                    .color(ThemeColors::ACCENT_WARNING),
                            )
                            .on_hover_text("授权已失效，请删除后重新登录");
                        }

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui
                                .add_enabled(!is_current, egui::Button::new("切换"))
                                .clicked()
                            {
                                action = Some(AccountsAction::Switch(account.id.clone()));
                            }
                        });
                    });
                });

            ui.add_space(8.0);
        }
    });

    action
}
