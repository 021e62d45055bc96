//! Authenticated JSON client for the management API
//!
//! Classifies every response into success, structured rejection (an error
//! envelope in the body) or plain failure. How a rejection is surfaced
//! depends on the verb; see the individual methods.

use std::sync::Arc;

use apigate_domain::{ApiGateError, ClientConfig, RemoteError, RemoteOutcome, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use url::Url;

use super::models::ErrorEnvelope;
use super::translate::remote_error_from_vendor;
use crate::auth::AccessTokenProvider;
use crate::errors::conversions::status_error;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Unsuccessful response, split by whether the body carried an envelope
#[derive(Debug)]
enum Failure {
    Structured(RemoteError),
    Unstructured(ApiGateError),
}

impl Failure {
    fn into_error(self) -> ApiGateError {
        match self {
            Self::Structured(remote) => ApiGateError::Rejected(remote),
            Self::Unstructured(err) => err,
        }
    }
}

pub struct ApiClient {
    http: HttpClient,
    auth: Arc<dyn AccessTokenProvider>,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `config.base_url`
    ///
    /// # Errors
    ///
    /// Returns `ApiGateError::Config` if the base URL is not an absolute
    /// http(s) URL or the HTTP client cannot be built
    pub fn new(config: &ClientConfig, auth: Arc<dyn AccessTokenProvider>) -> Result<Self> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| ApiGateError::Config(format!("Invalid base URL {}: {}", config.base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ApiGateError::Config(format!(
                "Unsupported base URL scheme: {}",
                parsed.scheme()
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = HttpClient::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()
            .map_err(|e| ApiGateError::Config(format!("Failed to build HttpClient: {}", e)))?;

        Ok(Self { http, auth, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    /// GET a resource.
    ///
    /// A 404 is reported as `NotFound` whatever the body says; any other
    /// envelope becomes `Rejected`.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, |request| request).await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiGateError::NotFound(format!("{} was not found", path)));
        }
        if !status.is_success() {
            return Err(Self::failure(response).await.into_error());
        }

        Self::decode(response).await
    }

    /// DELETE a resource; the response body is ignored on success.
    ///
    /// Every unsuccessful status is an error, with envelopes passed through
    /// as `Rejected`.
    #[instrument(skip(self), fields(path = %path))]
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.send(Method::DELETE, path, |request| request).await?;

        if !response.status().is_success() {
            return Err(Self::failure(response).await.into_error());
        }
        Ok(())
    }

    /// POST a JSON body.
    ///
    /// A client-error status with an envelope resolves to
    /// [`RemoteOutcome::Rejected`]. Server errors and bodies without an
    /// envelope are errors.
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<RemoteOutcome<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, |request| request.json(body)).await?;

        let status = response.status();
        if status.is_success() {
            return Self::decode(response).await.map(RemoteOutcome::Accepted);
        }

        match Self::failure(response).await {
            Failure::Structured(remote) if status.is_client_error() => {
                warn!(code = remote.code, status = %remote.status, "Request rejected by remote");
                Ok(RemoteOutcome::Rejected(remote))
            }
            failure => Err(failure.into_error()),
        }
    }

    async fn send<F>(&self, method: Method, path: &str, prepare: F) -> Result<Response>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let url = format!("{}{}", self.base_url, path);
        let token = self.auth.access_token().await?;

        debug!(%method, url = %url, "Management API request");
        let request = prepare(self.http.request(method, &url).bearer_auth(token));
        self.http.send(request).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(|e| ApiGateError::from(InfraError::from(e)))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiGateError::from(InfraError::from(e)))
    }

    async fn failure(response: Response) -> Failure {
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(error) => {
                debug!(%status, %error, "Failed to read error body");
                String::new()
            }
        };

        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) => {
                let remote = remote_error_from_vendor(envelope.error, status.as_u16());
                if status.is_server_error() {
                    debug!(%status, message = %remote.message, "Server error with envelope");
                    return Failure::Unstructured(ApiGateError::Network(format!(
                        "HTTP {}: {}",
                        status.as_u16(),
                        remote
                    )));
                }
                Failure::Structured(remote)
            }
            Err(_) => {
                debug!(%status, "Unsuccessful response without error envelope");
                Failure::Unstructured(status_error(status.as_u16(), status.canonical_reason()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[derive(Clone)]
    struct MockAuthProvider {
        token: String,
    }

    #[async_trait]
    impl AccessTokenProvider for MockAuthProvider {
        async fn access_token(&self) -> Result<String> {
            Ok(self.token.clone())
        }
    }

    struct FailingAuthProvider;

    #[async_trait]
    impl AccessTokenProvider for FailingAuthProvider {
        async fn access_token(&self) -> Result<String> {
            Err(ApiGateError::Auth("no credentials".into()))
        }
    }

    fn client(server: &MockServer) -> ApiClient {
        let config = ClientConfig::for_organization("acme").with_base_url(server.uri());
        let auth = Arc::new(MockAuthProvider { token: "test-token".to_string() });
        ApiClient::new(&config, auth).expect("api client")
    }

    fn envelope(code: u16, status: &str, message: &str) -> Value {
        json!({ "error": { "code": code, "message": message, "status": status } })
    }

    #[tokio::test]
    async fn get_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/thing"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let value: Value = client(&server).get("/thing").await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn get_404_is_not_found_even_with_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(envelope(404, "NOT_FOUND", "gone")),
            )
            .mount(&server)
            .await;

        let err = client(&server).get::<Value>("/thing").await.unwrap_err();
        assert!(matches!(err, ApiGateError::NotFound(_)));
    }

    #[tokio::test]
    async fn post_client_error_with_envelope_is_rejected_outcome() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(envelope(400, "FAILED_PRECONDITION", "bad product")),
            )
            .mount(&server)
            .await;

        let outcome: RemoteOutcome<Value> =
            client(&server).post("/thing", &json!({})).await.unwrap();
        assert_eq!(
            outcome,
            RemoteOutcome::Rejected(RemoteError::new(400, "FAILED_PRECONDITION", "bad product"))
        );
    }

    #[tokio::test]
    async fn post_server_error_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503).set_body_json(envelope(503, "UNAVAILABLE", "busy")))
            .mount(&server)
            .await;

        let result = client(&server).post::<_, Value>("/thing", &json!({})).await;
        assert!(matches!(result, Err(ApiGateError::Network(_))));
    }

    #[tokio::test]
    async fn post_client_error_without_envelope_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let result = client(&server).post::<_, Value>("/thing", &json!({})).await;
        assert!(matches!(result, Err(ApiGateError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn delete_rejection_is_passed_through() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(envelope(403, "PERMISSION_DENIED", "no")),
            )
            .mount(&server)
            .await;

        let err = client(&server).delete("/thing").await.unwrap_err();
        assert_eq!(err, ApiGateError::Rejected(RemoteError::new(403, "PERMISSION_DENIED", "no")));
    }

    #[tokio::test]
    async fn malformed_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = client(&server).get::<Value>("/thing").await.unwrap_err();
        assert!(matches!(err, ApiGateError::Decode(_)));
    }

    #[tokio::test]
    async fn token_failure_stops_before_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let config = ClientConfig::for_organization("acme").with_base_url(server.uri());
        let client = ApiClient::new(&config, Arc::new(FailingAuthProvider)).unwrap();

        let err = client.get::<Value>("/thing").await.unwrap_err();
        assert!(matches!(err, ApiGateError::Auth(_)));
    }

    #[tokio::test]
    async fn truncated_error_body_keeps_status_classification() {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = [0u8; 1024];
            let _ = socket.read(&mut request).await;
            let head = "HTTP/1.1 400 Bad Request\r\ncontent-length: 200\r\n\r\n{\"error\"";
            let _ = socket.write_all(head.as_bytes()).await;
        });

        let config =
            ClientConfig::for_organization("acme").with_base_url(format!("http://{addr}"));
        let auth = Arc::new(MockAuthProvider { token: "t".into() });
        let client = ApiClient::new(&config, auth).unwrap();

        let result = client.post::<_, Value>("/thing", &json!({})).await;
        assert!(matches!(result, Err(ApiGateError::InvalidInput(_))));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let config = ClientConfig::for_organization("acme").with_base_url("ftp://example.com");
        let auth = Arc::new(MockAuthProvider { token: "t".into() });
        assert!(matches!(ApiClient::new(&config, auth), Err(ApiGateError::Config(_))));
    }
}
