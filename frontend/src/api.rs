use thiserror::Error;

use crate::models::Room;

/// Base URL used when `BRAIN_TEASERS_API_BASE` is not set at build time.
pub const DEFAULT_API_BASE: &str = "http://localhost:8080";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Server error: {status} {body}")]
    Status { status: u16, body: String },

    #[error("Parse error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the riddle game backend. Every call is a single request
/// with no retry and the library's default timeouts.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http: reqwest::Client::new(), base_url }
    }

    /// Client pointed at the base URL baked in at build time.
    pub fn from_build_env() -> Self {
        Self::new(option_env!("BRAIN_TEASERS_API_BASE").unwrap_or(DEFAULT_API_BASE))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /rooms` — rooms exactly as the server returns them.
    pub async fn list_rooms(&self) -> Result<Vec<Room>, ApiError> {
        let resp = self
            .http
            .get(format!("{}/rooms", self.base_url))
            .send()
            .await
            .map_err(ApiError::Network)?;

        ensure_success(resp)
            .await?
            .json::<Vec<Room>>()
            .await
            .map_err(ApiError::Decode)
    }

    /// `POST /{room_id}/chat?userPrompt=...` with an empty body; returns the
    /// answer text verbatim.
    pub async fn post_chat(&self, room_id: i64, user_prompt: &str) -> Result<String, ApiError> {
        let resp = self
            .http
            .post(format!("{}/{room_id}/chat", self.base_url))
            .query(&[("userPrompt", user_prompt)])
            .send()
            .await
            .map_err(ApiError::Network)?;

        ensure_success(resp).await?.text().await.map_err(ApiError::Decode)
    }
}

async fn ensure_success(resp: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(ApiError::Status { status: status.as_u16(), body })
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Bytes;
    use axum::http::{Method, StatusCode, Uri, header};

    use super::*;

    #[derive(Clone, Debug)]
    struct Recorded {
        method: Method,
        path: String,
        query: Option<String>,
        body: Vec<u8>,
    }

    type Log = Arc<Mutex<Vec<Recorded>>>;

    /// Starts a server on an ephemeral port that answers every request with
    /// the given status and body, recording what it received.
    async fn spawn_server(status: StatusCode, content_type: &'static str, body: &'static str) -> (String, Log) {
        let log: Log = Arc::default();
        let recorder = log.clone();
        let app = Router::new().fallback(move |method: Method, uri: Uri, bytes: Bytes| {
            let recorder = recorder.clone();
            async move {
                recorder.lock().unwrap().push(Recorded {
                    method,
                    path: uri.path().to_string(),
                    query: uri.query().map(str::to_string),
                    body: bytes.to_vec(),
                });
                (status, [(header::CONTENT_TYPE, content_type)], body)
            }
        });

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), log)
    }

    #[tokio::test]
    async fn list_rooms_issues_one_get_and_returns_body_unchanged() {
        let raw = r#"[{"roomId":1,"chatMessageList":[]}]"#;
        let (base, log) = spawn_server(StatusCode::OK, "application/json", raw).await;

        let rooms = ApiClient::new(&base).list_rooms().await.unwrap();

        assert_eq!(
            serde_json::to_value(&rooms).unwrap(),
            serde_json::from_str::<serde_json::Value>(raw).unwrap()
        );
        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].method, Method::GET);
        assert_eq!(log[0].path, "/rooms");
        assert_eq!(log[0].query, None);
    }

    #[tokio::test]
    async fn list_rooms_preserves_order_and_messages() {
        let raw = r#"[
            {"roomId":5,"chatMessageList":[{"role":"user","content":"start"}]},
            {"roomId":2,"chatMessageList":[]}
        ]"#;
        let (base, _) = spawn_server(StatusCode::OK, "application/json", raw).await;

        let rooms = ApiClient::new(base).list_rooms().await.unwrap();

        assert_eq!(rooms.iter().map(|r| r.room_id).collect::<Vec<_>>(), vec![5, 2]);
        assert_eq!(rooms[0].chat_message_list[0].content, "start");
    }

    #[tokio::test]
    async fn post_chat_sends_prompt_as_query_with_empty_body() {
        let (base, log) = spawn_server(StatusCode::OK, "text/plain", "Yes.").await;

        ApiClient::new(base).post_chat(3, "hello").await.unwrap();

        let log = log.lock().unwrap();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].method, Method::POST);
        assert_eq!(log[0].path, "/3/chat");
        assert_eq!(log[0].query.as_deref(), Some("userPrompt=hello"));
        assert!(log[0].body.is_empty());
    }

    #[tokio::test]
    async fn post_chat_encodes_prompt() {
        let (base, log) = spawn_server(StatusCode::OK, "text/plain", "No.").await;

        ApiClient::new(base).post_chat(8, "is it a cat & a dog?").await.unwrap();

        let query = log.lock().unwrap()[0].query.clone().unwrap();
        assert_eq!(query, "userPrompt=is+it+a+cat+%26+a+dog%3F");
    }

    #[tokio::test]
    async fn post_chat_returns_body_verbatim() {
        let answer = "  Game over.\nThe man was the lighthouse keeper.  ";
        let (base, _) = spawn_server(StatusCode::OK, "text/plain", answer).await;

        let got = ApiClient::new(base).post_chat(1, "give up").await.unwrap();

        assert_eq!(got, answer);
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let (base, _) =
            spawn_server(StatusCode::SERVICE_UNAVAILABLE, "text/plain", "Ollama service unavailable").await;
        let client = ApiClient::new(base);

        let err = client.post_chat(1, "start").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, ref body } if body == "Ollama service unavailable"));

        let err = client.list_rooms().await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 503, .. }));
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let (base, _) = spawn_server(StatusCode::OK, "application/json", "{not json").await;

        let err = ApiClient::new(base).list_rooms().await.unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_network_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = ApiClient::new(format!("http://{addr}")).list_rooms().await.unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(ApiClient::new("http://localhost:8080/").base_url(), DEFAULT_API_BASE);
    }
}
