//! Usage detail card for the current account

use egui::{RichText, Rounding};

use crate::dashboard::theme::ThemeColors;
use crate::models::{QuotaLevel, UsageDisplay};

/// Render the usage card. Returns true when the refresh button was clicked;
/// the caller owns the actual refresh request.
pub fn render_usage_card(
    ui: &mut egui::Ui,
    usage: Option<&UsageDisplay>,
    loading: bool,
    error: Option<&str>,
) -> bool {
    let mut refresh_clicked = false;

    egui::Frame::none()
        .fill(ThemeColors::BG_LIGHT)
        .rounding(Rounding::same(6.0))
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("配额用量")
                        .size(12.0)
                        .color(ThemeColors::TEXT_MUTED),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if loading {
                        ui.add(egui::Spinner::new().size(14.0));
                    } else if ui.small_button("刷新").clicked() {
                        refresh_clicked = true;
                    }
                });
            });

            if let Some(error) = error {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(error)
                        .size(12.0)
                        .color(ThemeColors::ACCENT_ERROR),
                );
            }

            ui.add_space(8.0);

            match usage {
                Some(usage) => {
                    quota_row(ui, "5 小时配额", usage.five_hour_left);
                    ui.add_space(6.0);
                    quota_row(ui, "周配额", usage.weekly_left);
                }
                None => {
                    ui.label(
                        RichText::new("暂无配额数据")
                            .size(13.0)
                            .color(ThemeColors::TEXT_MUTED),
                    );
                }
            }
        });

    refresh_clicked
}

fn quota_row(ui: &mut egui::Ui, label: &str, percent_left: u8) {
    let level = QuotaLevel::from_percent(percent_left);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(label)
                .size(13.0)
                .color(ThemeColors::TEXT_SECONDARY),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{percent_left}%"))
                    .size(13.0)
                    .color(level.color()),
            );
        });
    });
    ui.add(
        egui::ProgressBar::new(f32::from(percent_left) / 100.0)
            .desired_height(6.0)
            .fill(level.color()),
    );
}
