use chrono::NaiveDate;
use tracing::{instrument, Level};

use crate::{
    config::ConfigStore,
    error::Error,
    fetch::MenuSource,
    menu::get_menu,
    notify::{format_menu_message, Gateway, TITLE},
};

/// Ties config, menu page and gateway together for one daily check.
#[derive(Debug)]
pub struct MenuNotifier<S, G> {
    store: ConfigStore,
    source: S,
    gateway: G,
}

impl<S: MenuSource, G: Gateway> MenuNotifier<S, G> {
    pub const fn new(store: ConfigStore, source: S, gateway: G) -> Self {
        Self {
            store,
            source,
            gateway,
        }
    }

    /// Sends today's menu if `today` is a configured day and the page has dishes for it.
    ///
    /// Only a broken config is returned as an error, every other failure
    /// (including a config file that went missing) is logged and the day is skipped.
    #[instrument(skip(self), level = Level::DEBUG)]
    pub async fn check_and_send(&self, today: NaiveDate) -> crate::Result<()> {
        let config = match self.store.load().await {
            Ok(config) => config,
            Err(Error::MissingConfig(p)) => {
                log::error!("Config file {} is gone, skipping the check for {today}", p.display());
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        if !config.is_notification_day(today) {
            log::debug!("{today} is not a notification day");
            return Ok(());
        }

        let Some(menu) = get_menu(&self.source, &config).await else {
            return Ok(());
        };
        if menu.dishes().is_empty() {
            log::info!("No dishes listed for {}", menu.display_date());
            return Ok(());
        }
        if !config.gotify.enabled {
            log::info!("Gotify is disabled, not sending the menu for {}", menu.display_date());
            return Ok(());
        }

        let message = format_menu_message(&menu.display_date(), menu.dishes());
        let sent = self
            .gateway
            .send(
                &config.gotify.server_url,
                &config.gotify.api_key,
                TITLE,
                &message,
            )
            .await;
        log::debug!("Menu for {} delivered: {sent}", menu.display_date());
        Ok(())
    }
}
