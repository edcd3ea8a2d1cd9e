//! Log subscriber setup.
//!
//! `RUST_LOG` takes precedence. Without it the level follows `-v`: warnings
//! by default, `-v` for debug, `-vv` for trace. Logs go to stderr so they
//! never mix with rendered output.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info,deskview=debug,deskview_render=debug",
        _ => "trace",
    }
}

pub fn init(verbose: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A subscriber may already be installed when embedded.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}
