//! QuotaSwitch - account quota dashboard
//!
//! Desktop utility for watching per-account usage quotas, switching the
//! active account, and editing IDE-reload preferences. All account, usage
//! and settings storage lives behind the backend bridge port; this binary
//! runs against the in-memory bridge.

mod bridge;
mod dashboard;
mod models;
mod shared;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use parking_lot::RwLock;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::bridge::{BackendBridge, BridgeHandle, MemoryBridge};
use crate::dashboard::DashboardApp;
use crate::shared::SharedAppState;

/// QuotaSwitch - account quota dashboard
#[derive(Parser, Debug)]
#[command(name = "quota-switch")]
#[command(about = "Dashboard for account quota monitoring and one-click switching")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("QuotaSwitch starting...");

    // The runtime outlives the UI loop; bridge tasks run on it.
    let runtime = tokio::runtime::Runtime::new()?;
    let runtime_handle = runtime.handle().clone();

    let bridge: Arc<dyn BackendBridge> = Arc::new(MemoryBridge::with_demo_data());
    let shared_state = Arc::new(RwLock::new(SharedAppState::default()));

    if let Err(e) = eframe::run_native(
        "QuotaSwitch",
        DashboardApp::options(),
        Box::new(move |cc| {
            let (bridge_handle, events) =
                BridgeHandle::new(bridge, runtime_handle, cc.egui_ctx.clone());
            Ok(Box::new(DashboardApp::new(
                shared_state,
                bridge_handle,
                events,
            )))
        }),
    ) {
        tracing::error!("Dashboard error: {e}");
    }

    info!("QuotaSwitch shutdown complete");

    Ok(())
}
