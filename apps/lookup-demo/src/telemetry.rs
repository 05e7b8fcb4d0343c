use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// `RUST_LOG` controls the filter; `LOG_FORMAT=json` switches to JSON lines.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm=warn"));

    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.with_ansi(false).json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer.compact())
            .init();
    }
}
