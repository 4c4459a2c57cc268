pub mod build_info;

use tracing_subscriber::{fmt, EnvFilter};

/// Installs the global subscriber: `RUST_LOG` directives plus `giftbook=info`,
/// written to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "giftbook=info".parse() {
        filter = filter.add_directive(directive);
    }

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
