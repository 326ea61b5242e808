use env_logger::{Builder, Env};
use log::LevelFilter;

/// Log target for per-waypoint movement diagnostics.
///
/// Enable with `RUST_LOG=tramline::moves=debug`.
pub const MOVES_TARGET: &str = "tramline::moves";

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages are printed, including the
/// movement diagnostics under [`MOVES_TARGET`]. Otherwise only info level and
/// above are shown and movement chatter stays silent unless `RUST_LOG` asks
/// for it.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    if !verbose && std::env::var_os("RUST_LOG").is_none() {
        builder.filter_module(MOVES_TARGET, LevelFilter::Warn);
    }

    // `try_init` only fails if a logger was already set. Tests call `init`
    // repeatedly, so that case is ignored.
    let _ = builder.try_init();
}
