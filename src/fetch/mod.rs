use reqwest::Client;
use tracing::{instrument, Level};
use url::Url;

static USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub fn make_client() -> crate::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .gzip(true)
        .build()
        .map_err(From::from)
}

/// Where the menu page comes from.
#[allow(async_fn_in_trait)]
pub trait MenuSource {
    async fn menu_page(&self, url: &Url) -> crate::Result<String>;
}

impl MenuSource for Client {
    #[instrument(skip_all, fields(url = %url), level = Level::TRACE)]
    async fn menu_page(&self, url: &Url) -> crate::Result<String> {
        let start = std::time::Instant::now();
        let res = self.get(url.clone()).send().await?.error_for_status()?;
        let text = res.text().await?;
        log::trace!("Got text of menu page in \t {:?}", start.elapsed());
        Ok(text)
    }
}
