//! Reusable UI components for the dashboard

pub mod sidebar;
pub mod stats_bar;
pub mod usage_card;

pub use sidebar::render_sidebar;
pub use stats_bar::render_stats_bar;
pub use usage_card::render_usage_card;
