//! Dashboard views

pub mod accounts;
pub mod overview;
pub mod settings;

pub use accounts::{render_accounts_view, AccountsAction};
pub use overview::{render_overview_view, OverviewAction};
pub use settings::{render_settings_view, SettingsAction};
