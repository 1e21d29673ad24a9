//! Dashboard UI Module
//!
//! The QuotaSwitch window: sidebar navigation plus the overview, accounts
//! and settings views.

pub mod app;
pub mod components;
pub mod state;
pub mod theme;
pub mod views;

pub use app::DashboardApp;
pub use state::{DashboardState, DashboardView};
