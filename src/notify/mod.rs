mod format;

pub use format::{format_menu_message, TITLE};

use reqwest::Client;
use serde::Serialize;
use tracing::{instrument, Level};
use url::Url;

use crate::error::Error;

/// Gotify's "normal" priority, shown as a regular push notification.
const PRIORITY: u8 = 5;

/// Something a finished message can be pushed to.
#[allow(async_fn_in_trait)]
pub trait Gateway {
    /// Makes a single delivery attempt and reports whether it was accepted.
    async fn send(&self, endpoint: &Url, api_key: &str, title: &str, message: &str) -> bool;
}

#[derive(Debug, Serialize)]
struct GotifyMessage<'a> {
    title: &'a str,
    message: &'a str,
    priority: u8,
}

#[derive(Debug, Clone)]
pub struct Gotify {
    client: Client,
}

impl Gotify {
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    async fn post(
        &self,
        endpoint: &Url,
        api_key: &str,
        title: &str,
        message: &str,
    ) -> crate::Result<()> {
        let url = message_url(endpoint)?;
        self.client
            .post(url)
            .header("X-Gotify-Key", api_key)
            .json(&GotifyMessage {
                title,
                message,
                priority: PRIORITY,
            })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl Gateway for Gotify {
    #[instrument(skip_all, fields(endpoint = %endpoint, title = %title), level = Level::DEBUG)]
    async fn send(&self, endpoint: &Url, api_key: &str, title: &str, message: &str) -> bool {
        match self.post(endpoint, api_key, title, message).await {
            Ok(()) => {
                log::info!("Sent notification {title:?} to {endpoint}");
                true
            }
            Err(e) => {
                log::error!("Gotify error: {e}");
                false
            }
        }
    }
}

/// `<endpoint>/message`, keeping any path the server is mounted under.
pub fn message_url(endpoint: &Url) -> crate::Result<Url> {
    let mut url = endpoint.clone();
    url.path_segments_mut()
        .map_err(|()| Error::Config(format!("{endpoint} can't be used as a gotify server url")))?
        .pop_if_empty()
        .push("message");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
        task::JoinHandle,
    };

    use super::*;
    use crate::fetch::make_client;

    #[test]
    fn test_message_url() {
        let cases = [
            ("https://gotify.example.com", "https://gotify.example.com/message"),
            ("https://example.com/gotify", "https://example.com/gotify/message"),
            ("https://example.com/gotify/", "https://example.com/gotify/message"),
        ];
        for (endpoint, expected) in cases {
            let url = message_url(&endpoint.parse().unwrap()).unwrap();
            assert_eq!(url.as_str(), expected);
        }
    }

    #[test]
    fn test_message_url_rejects_non_base() {
        let url: Url = "mailto:someone@example.com".parse().unwrap();
        assert!(matches!(message_url(&url), Err(Error::Config(_))));
    }

    #[test]
    fn test_message_body() {
        let body = serde_json::to_value(GotifyMessage {
            title: TITLE,
            message: "hallo",
            priority: PRIORITY,
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "🍴 RBZ Speiseplan", "message": "hallo", "priority": 5})
        );
    }

    /// Answers a single request with `status` and hands back the raw request.
    async fn serve_once(status: &'static str) -> (Url, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap())
            .parse()
            .unwrap();
        let handle = tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];
            let head_len = loop {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the headers ended");
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&request[..head_len]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .map_or(0, |len| len.trim().parse::<usize>().unwrap());
            while request.len() < head_len + body_len {
                let n = stream.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the body ended");
                request.extend_from_slice(&chunk[..n]);
            }
            let response =
                format!("HTTP/1.1 {status}\r\ncontent-length: 0\r\nconnection: close\r\n\r\n");
            stream.write_all(response.as_bytes()).await.unwrap();
            String::from_utf8(request).unwrap()
        });
        (endpoint, handle)
    }

    #[tokio::test]
    async fn test_send_posts_to_gotify() {
        let (endpoint, request) = serve_once("200 OK").await;
        let gotify = Gotify::new(make_client().unwrap());
        assert!(gotify.send(&endpoint, "secret", TITLE, "1. Spaghetti").await);

        let request = request.await.unwrap();
        assert!(request.starts_with("POST /message HTTP/1.1\r\n"), "{request}");
        let lower = request.to_lowercase();
        assert!(lower.contains("\r\nx-gotify-key: secret\r\n"), "{request}");
        assert!(lower.contains("\r\ncontent-type: application/json\r\n"), "{request}");
        let body = &request[request.find("\r\n\r\n").unwrap() + 4..];
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": TITLE, "message": "1. Spaghetti", "priority": 5})
        );
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let (endpoint, request) = serve_once("500 Internal Server Error").await;
        let gotify = Gotify::new(make_client().unwrap());
        assert!(!gotify.send(&endpoint, "secret", TITLE, "message").await);
        assert!(request.await.unwrap().starts_with("POST /message "));
    }

    #[tokio::test]
    async fn test_send_failure_is_reported() {
        let gotify = Gotify::new(make_client().unwrap());
        let endpoint: Url = "http://127.0.0.1:9".parse().unwrap();
        assert!(!gotify.send(&endpoint, "key", TITLE, "message").await);
    }
}
