use tracing::{error, info};

mod telemetry;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // The overlay goes first so RUST_LOG and LOG_FORMAT from env files apply.
    let config = lookup_demo::run::load_config();
    telemetry::init_tracing();

    let result = match config {
        Ok(config) => lookup_demo::run::run_with(&config).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(report) => {
            info!(
                created_id = report.created.id,
                updated = report.updated.is_some(),
                selected = report.selected.len(),
                "exiting program"
            );
        }
        Err(e) => {
            error!(code = e.code(), error = %e, "lookup demo failed");
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
