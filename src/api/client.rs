//! Webhook client
//!
//! Posts one application payload per call. There are no retries: every call is
//! exactly one request, and the caller decides what to show for the outcome.

use reqwest::Client;
use thiserror::Error;

use crate::config::WebhookConfig;
use crate::payload::ApplicationPayload;

const UNKNOWN_ERROR_BODY: &str = "Unknown error";

/// API errors
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to submit application: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// Client for the application webhook
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    pub fn new(config: &WebhookConfig) -> Self {
        let mut builder = Client::builder().danger_accept_invalid_certs(!config.verify_ssl);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "Falling back to default HTTP client");
            Client::new()
        });

        WebhookClient {
            client,
            url: config.url.trim().to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST the payload as JSON. Any 2xx status is acceptance.
    pub async fn post_application(&self, payload: &ApplicationPayload) -> Result<(), ApiError> {
        // `.json()` sets `Content-Type: application/json`
        let response = self.client.post(&self.url).json(payload).send().await?;
        let status = response.status();

        if status.is_success() {
            tracing::info!(status = status.as_u16(), "Webhook accepted application");
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let message = if body.trim().is_empty() {
            UNKNOWN_ERROR_BODY.to_string()
        } else {
            body
        };

        tracing::warn!(status = status.as_u16(), %message, "Webhook rejected application");
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{ApplicationAnswers, Personality};
    use axum::{extract::Json, http::HeaderMap, http::StatusCode, routing::post, Router};
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    fn sample_payload() -> ApplicationPayload {
        ApplicationPayload {
            full_name: "Linus Example".to_string(),
            gender: "male".to_string(),
            language: "Finnish".to_string(),
            email: "linus@example.com".to_string(),
            experience_years: Some(3),
            industry_experience: vec!["renovation".to_string()],
            computer_skills: vec![],
            driver_license: "B".to_string(),
            resume_base64: String::new(),
            application_answers: ApplicationAnswers {
                available_start: "2026-12-01".to_string(),
                notice_period: "immediately".to_string(),
            },
            personality: Personality::default(),
        }
    }

    async fn spawn_server(app: Router) -> (SocketAddr, tokio::task::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (addr, handle)
    }

    fn client_for(addr: SocketAddr) -> WebhookClient {
        WebhookClient::new(&WebhookConfig {
            url: format!("http://{addr}/webhook/apply"),
            timeout_seconds: Some(5),
            verify_ssl: true,
        })
    }

    #[test]
    fn test_url_is_trimmed() {
        let client = WebhookClient::new(&WebhookConfig {
            url: "  https://hooks.example.com/apply ".to_string(),
            ..WebhookConfig::default()
        });
        assert_eq!(client.url(), "https://hooks.example.com/apply");
    }

    #[tokio::test]
    async fn test_posts_json_payload() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let app = Router::new().route(
            "/webhook/apply",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    let content_type = headers
                        .get("content-type")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *captured.lock().unwrap() = Some((content_type, body));
                    StatusCode::OK
                }
            }),
        );
        let (addr, handle) = spawn_server(app).await;

        client_for(addr)
            .post_application(&sample_payload())
            .await
            .unwrap();

        let (content_type, body) = seen.lock().unwrap().take().unwrap();
        assert_eq!(content_type, "application/json");
        assert_eq!(body["full_name"], "Linus Example");
        assert_eq!(body["experience_years"], 3);
        assert_eq!(body["application_answers"]["available_start"], "2026-12-01");
        assert_eq!(body["personality"]["patient"], false);

        handle.abort();
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let app = Router::new().route(
            "/webhook/apply",
            post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "invalid email") }),
        );
        let (addr, handle) = spawn_server(app).await;

        let err = client_for(addr)
            .post_application(&sample_payload())
            .await
            .unwrap_err();
        match &err {
            ApiError::Api { status, message } => {
                assert_eq!(*status, 422);
                assert_eq!(message, "invalid email");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(err.to_string(), "Server error: 422 - invalid email");

        handle.abort();
    }

    #[tokio::test]
    async fn test_empty_error_body_uses_placeholder() {
        let app = Router::new().route(
            "/webhook/apply",
            post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let (addr, handle) = spawn_server(app).await;

        let err = client_for(addr)
            .post_application(&sample_payload())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Server error: 500 - Unknown error");

        handle.abort();
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr)
            .post_application(&sample_payload())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(err.to_string().starts_with("Failed to submit application: "));
    }
}
