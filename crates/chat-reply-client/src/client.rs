use std::time::Duration;

use tracing::{debug, warn};
use url::Url;

use crate::types::{ChatReply, ChatRequest, Health};
use crate::{ReplyError, ReplyResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one reply service instance.
#[derive(Debug, Clone)]
pub struct ChatReplyClient {
    http: reqwest::Client,
    base: Url,
}

impl ChatReplyClient {
    /// `base` is the service root, e.g. `http://127.0.0.1:8000`.
    pub fn new(base: Url) -> ReplyResult<Self> {
        Self::with_timeout(base, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(mut base: Url, timeout: Duration) -> ReplyResult<Self> {
        // Url::join replaces the last segment unless the path ends in '/'.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Asks the service for a reply to `text`.
    pub async fn ask(&self, text: &str) -> ReplyResult<ChatReply> {
        let endpoint = self.base.join("chat")?;
        debug!(%endpoint, chars = text.chars().count(), "requesting chat reply");

        let response = self
            .http
            .post(endpoint)
            .json(&ChatRequest::new(text))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "chat reply service returned an error");
            return Err(ReplyError::Status(status.as_u16()));
        }

        let reply: ChatReply = response.json().await?;
        debug!(intent = %reply.decided_intent, prob = reply.best_prob, "chat reply received");
        Ok(reply)
    }

    /// Checks whether the service has its model loaded.
    pub async fn health(&self) -> ReplyResult<Health> {
        let endpoint = self.base.join("health")?;
        let response = self.http.get(endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ReplyError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serves exactly one request with `status` and `body`, handing the raw
    /// request back through the returned channel.
    async fn serve_once(status: &'static str, body: &'static str) -> (Url, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(request);
        });

        (Url::parse(&format!("http://{addr}")).unwrap(), rx)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(head_end) = text.find("\r\n\r\n") {
                let content_length = text[..head_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let client = ChatReplyClient::new(Url::parse("http://localhost:8000/api").unwrap()).unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/api/");
        assert_eq!(
            client.base_url().join("chat").unwrap().as_str(),
            "http://localhost:8000/api/chat"
        );
    }

    #[tokio::test]
    async fn ask_posts_request_and_decodes_reply() {
        let (base, request) = serve_once(
            "200 OK",
            r#"{"response":"¡Hola amigo!","decided_intent":"SALUDAR","best_prob":0.87,"pictos":["👋"]}"#,
        )
        .await;

        let reply = ChatReplyClient::new(base).unwrap().ask("hola").await.unwrap();
        assert_eq!(reply.response, "¡Hola amigo!");
        assert_eq!(reply.decided_intent, "SALUDAR");
        assert_eq!(reply.pictogram_text().as_deref(), Some("👋"));

        let raw = request.await.unwrap();
        assert!(raw.starts_with("POST /chat HTTP/1.1"));
        assert!(raw.ends_with(r#"{"text":"hola","include_pictos":true}"#));
    }

    #[tokio::test]
    async fn server_error_is_status() {
        let (base, _request) = serve_once("500 Internal Server Error", r#"{"detail":"boom"}"#).await;
        let err = ChatReplyClient::new(base).unwrap().ask("hola").await.unwrap_err();
        assert!(matches!(err, ReplyError::Status(500)));
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let base = Url::parse(&format!("http://{addr}")).unwrap();
        let err = ChatReplyClient::new(base).unwrap().ask("hola").await.unwrap_err();
        assert!(matches!(err, ReplyError::Http(_)));
    }

    #[tokio::test]
    async fn health_check() {
        let (base, request) =
            serve_once("200 OK", r#"{"status":"healthy","model_loaded":true}"#).await;
        let health = ChatReplyClient::new(base).unwrap().health().await.unwrap();
        assert!(health.is_healthy());
        assert!(request.await.unwrap().starts_with("GET /health HTTP/1.1"));
    }
}
