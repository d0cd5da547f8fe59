//! Log setup for the map binary
//!
//! The library itself only emits through the `log` facade; this installs an
//! `env_logger` backend that stamps each line with local time. `RUST_LOG`
//! overrides the default `info` level (e.g. `RUST_LOG=mapnav=debug`).

use chrono::Local;
use env_logger::Env;
use std::io::Write;

pub fn init() {
    let result = env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();

    if result.is_err() {
        log::debug!("logger already initialised");
    }
}
