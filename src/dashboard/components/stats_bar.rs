//! Summary stat tiles shown at the top of the overview
//!
//! Stateless: renders passed-in numbers, no callbacks, no side effects.

use egui::{Color32, RichText, Rounding};

use crate::dashboard::theme::{color_with_alpha, ThemeColors};
use crate::models::{QuotaLevel, UsageDisplay};

/// One read-only stat tile
struct StatTile {
    icon: &'static str,
    icon_color: Color32,
    value: String,
    label: &'static str,
    /// Threshold hint below the label, for quota tiles
    hint: Option<QuotaLevel>,
}

impl StatTile {
    fn new(
        icon: &'static str,
        icon_color: Color32,
        value: impl Into<String>,
        label: &'static str,
    ) -> Self {
        Self {
            icon,
            icon_color,
            value: value.into(),
            label,
            hint: None,
        }
    }

    fn with_hint(mut self, hint: Option<QuotaLevel>) -> Self {
        self.hint = hint;
        self
    }

    fn show(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(ThemeColors::BG_MEDIUM)
            .rounding(Rounding::same(8.0))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.set_min_width(150.0);

                ui.horizontal(|ui| {
                    egui::Frame::none()
                        .fill(color_with_alpha(self.icon_color, 40))
                        .rounding(Rounding::same(6.0))
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.label(RichText::new(self.icon).size(16.0).color(self.icon_color));
                        });

                    ui.add_space(8.0);

                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(&self.value)
                                .size(18.0)
                                .color(ThemeColors::TEXT_PRIMARY)
                                .strong(),
                        );
                        ui.label(
                            RichText::new(self.label)
                                .size(11.0)
                                .color(ThemeColors::TEXT_MUTED),
                        );
                        if let Some(level) = self.hint {
                            ui.label(
                                RichText::new(level.label())
                                    .size(11.0)
                                    .color(level.color()),
                            );
                        }
                    });
                });
            });
    }
}

/// Render the stats bar: account count, the two quota windows, and the
/// credit balance when the account type exposes one.
pub fn render_stats_bar(ui: &mut egui::Ui, account_count: usize, usage: Option<&UsageDisplay>) {
    ui.horizontal(|ui| {
        StatTile::new(
            "👤",
            ThemeColors::ACCENT_PRIMARY,
            account_count.to_string(),
            "账号总数",
        )
        .show(ui);

        ui.add_space(12.0);

        let five_hour = usage
            .map(|u| format!("{}%", u.five_hour_left))
            .unwrap_or_else(|| "-%".to_string());
        StatTile::new("⏱", ThemeColors::ACCENT_SUCCESS, five_hour, "5h 配额")
            .with_hint(usage.map(|u| QuotaLevel::from_percent(u.five_hour_left)))
            .show(ui);

        ui.add_space(12.0);

        let weekly = usage
            .map(|u| format!("{}%", u.weekly_left))
            .unwrap_or_else(|| "-%".to_string());
        StatTile::new("📅", ThemeColors::ACCENT_PRIMARY, weekly, "周配额")
            .with_hint(usage.map(|u| QuotaLevel::from_percent(u.weekly_left)))
            .show(ui);

        if usage.map(|u| u.has_credits).unwrap_or(false) {
            ui.add_space(12.0);
            let balance = usage.and_then(|u| u.credits_balance).unwrap_or(0.0);
            StatTile::new(
                "💰",
                ThemeColors::ACCENT_GOLD,
                format!("${balance:.2}"),
                "额度余额",
            )
            .show(ui);
        }
    });
}
