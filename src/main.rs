#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod check;
mod config;
mod error;
mod fetch;
mod menu;
mod notify;
mod parse;
mod scheduler;
mod weekday;

use std::env;

use chrono::Local;
use futures::FutureExt;

use crate::{
    check::MenuNotifier, config::ConfigStore, fetch::make_client, notify::Gotify,
    scheduler::Scheduler,
};

pub use error::Result;

#[cfg(all(target_env = "musl", target_pointer_width = "64"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let path = env::var("CONFIG").unwrap_or_else(|_| {
        log::warn!("env var CONFIG not set, using {}.", config::DEFAULT_PATH);
        config::DEFAULT_PATH.to_string()
    });
    let store = ConfigStore::new(path);
    log::info!("Using config at {}", store.path().display());
    // a broken config file stops the service right here
    let config = store.init().await?;

    let client = make_client()?;
    let notifier = MenuNotifier::new(store, client.clone(), Gotify::new(client));
    let notifier = &notifier;

    let mut scheduler = Scheduler::new();
    scheduler.every_day_at(config.check_time, Local::now().naive_local(), move || {
        notifier
            .check_and_send(Local::now().date_naive())
            .boxed_local()
    });

    log::info!(
        "Speiseplan service started. Checking at {} on {}",
        config.check_time.format("%H:%M"),
        config.days_to_show.join(", ")
    );
    if let Some(next) = scheduler.next_run() {
        log::info!("Next check at {next}");
    }

    scheduler.run().await?;
    Ok(())
}
