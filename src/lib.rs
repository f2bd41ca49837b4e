pub mod alias;
pub mod classify;
pub mod data;
pub mod frame;
pub mod normalize;
pub mod process;
pub mod rewrite;

use std::{env, sync::OnceLock};

use log::LevelFilter;

static LOGGER: OnceLock<()> = OnceLock::new();

/// Initializes the `env_logger` backend once per process. Embedding hosts that
/// install their own `log` backend can skip this entirely.
pub fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("textnorm", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}
