//! # LogisticsPRO Entry Point
//!
//! Loads the configuration, opens the document store and reports what the
//! remembered account holds. Screens drive the library directly; this
//! binary is the headless startup check.
//!
//! ```bash
//! # Platform config (logipro.toml) and data directory
//! cargo run -p logipro-app
//!
//! # Explicit config file
//! cargo run -p logipro-app -- ./logipro.toml
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use tracing::{error, info};

use logipro_app::commands::job::commission_summary;
use logipro_app::state::AppConfig;
use logipro_app::{init_tracing, AppContext};

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match AppConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Could not load configuration");
            return ExitCode::FAILURE;
        }
    };

    let context = match AppContext::bootstrap(config).await {
        Ok(context) => context,
        Err(e) => {
            error!(code = ?e.code, message = %e.message, "Startup failed");
            return ExitCode::FAILURE;
        }
    };

    match context.session.current_user() {
        Some(user) => {
            info!(email = %user.email, "Session restored");
            match commission_summary(&context.db, &context.session).await {
                Ok(summary) => info!(
                    jobs = summary.job_count,
                    unpaid = summary.unpaid_job_count,
                    "Completed jobs loaded"
                ),
                Err(e) => error!(message = %e.message, "Could not read completed jobs"),
            }
        }
        None => info!("No remembered account; sign in required"),
    }

    context.shutdown().await;
    ExitCode::SUCCESS
}
