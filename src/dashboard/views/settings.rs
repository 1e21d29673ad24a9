//! Settings view - editable draft with explicit save
//!
//! The draft lives in [`SettingsViewState`]; nothing is persisted until the
//! save button sends the whole record back through the bridge.

use egui::{RichText, Rounding};

use crate::dashboard::state::SettingsViewState;
use crate::dashboard::theme::ThemeColors;
use crate::models::IDE_OPTIONS;

/// User intent raised from the settings view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    /// Persist the current draft in full
    Save,
}

/// Render the settings view
pub fn render_settings_view(
    ui: &mut egui::Ui,
    state: &mut SettingsViewState,
) -> Option<SettingsAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        ui.heading(RichText::new("设置").size(24.0).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let saving = state.is_saving();
            let text = if saving { "保存中..." } else { "保存设置" };
            let button = egui::Button::new(RichText::new(text).color(egui::Color32::WHITE))
                .fill(ThemeColors::ACCENT_PRIMARY)
                .min_size(egui::vec2(100.0, 32.0));
            if ui.add_enabled(!saving, button).clicked() {
                action = Some(SettingsAction::Save);
            }
        });
    });

    if let Some(message) = state.message() {
        ui.add_space(8.0);
        egui::Frame::none()
            .fill(ThemeColors::BG_LIGHT)
            .rounding(Rounding::same(6.0))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(message).color(ThemeColors::TEXT_PRIMARY));
            });
    }

    ui.add_space(24.0);

    egui::ScrollArea::vertical().show(ui, |ui| {
        section(ui, "后台服务", |ui| {
            setting_row(
                ui,
                "后台自动刷新",
                Some("后台自动刷新所有账号的配额信息，这是 Token 保活的基础"),
                |ui| {
                    // Always on: shown as a behavior description, not a switch.
                    let mut always_on = true;
                    ui.add_enabled(false, egui::Checkbox::new(&mut always_on, "始终开启"));
                },
            );

            ui.add_space(8.0);

            setting_row(ui, "刷新间隔（分钟）", None, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.interval_text).desired_width(64.0),
                );
                if response.changed() {
                    state.apply_interval_text();
                }
            });
        });

        ui.add_space(16.0);

        section(ui, "IDE 重载", |ui| {
            setting_row(
                ui,
                "自动重载 IDE",
                Some("切换账号后自动重载 IDE 以应用新的 Token"),
                |ui| {
                    ui.checkbox(&mut state.draft.auto_reload_ide, "");
                },
            );

            // Dependent fields are only disclosed while auto-reload is on;
            // hiding them does not reset their values.
            if state.draft.auto_reload_ide {
                ui.add_space(8.0);

                setting_row(ui, "主力 IDE", Some("仅重载选中的 IDE"), |ui| {
                    let selected_label = IDE_OPTIONS
                        .iter()
                        .find(|(value, _)| *value == state.draft.primary_ide)
                        .map(|(_, label)| (*label).to_string())
                        .unwrap_or_else(|| state.draft.primary_ide.clone());

                    egui::ComboBox::from_id_salt("primary_ide")
                        .selected_text(selected_label)
                        .show_ui(ui, |ui| {
                            for (value, label) in IDE_OPTIONS {
                                ui.selectable_value(
                                    &mut state.draft.primary_ide,
                                    value.to_string(),
                                    label,
                                );
                            }
                        });
                });

                ui.add_space(8.0);

                setting_row(
                    ui,
                    "使用杀进程重启",
                    Some("使用 pkill 方式重启（Windsurf 推荐，无需权限）"),
                    |ui| {
                        ui.checkbox(&mut state.draft.use_pkill_restart, "");
                    },
                );
            }
        });
    });

    action
}

/// A titled settings section frame
fn section(ui: &mut egui::Ui, title: &str, content: impl FnOnce(&mut egui::Ui)) {
    egui::Frame::none()
        .fill(ThemeColors::BG_MEDIUM)
        .rounding(Rounding::same(8.0))
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.heading(RichText::new(title).size(16.0));
            ui.add_space(12.0);
            ui.separator();
            ui.add_space(12.0);
            content(ui);
        });
}

/// One labeled setting row with the control right-aligned
fn setting_row(
    ui: &mut egui::Ui,
    label: &str,
    description: Option<&str>,
    add_control: impl FnOnce(&mut egui::Ui),
) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(label).color(ThemeColors::TEXT_PRIMARY));
            if let Some(description) = description {
                ui.label(
                    RichText::new(description)
                        .size(11.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), add_control);
    });
}
