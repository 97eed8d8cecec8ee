//! Logging setup using env_logger
//!
//! Default level is `info` (`debug` with `--verbose`); `RUST_LOG` takes
//! precedence when set.

use env_logger::Env;

pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .init();
}
