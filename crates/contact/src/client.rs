use folio_shared::{ContactPayload, DispatchResult};
use reqwest::Client;

use crate::SubmitError;

#[async_trait::async_trait]
pub trait ContactClient: Send + Sync {
    async fn submit(&self, payload: &ContactPayload) -> Result<(), SubmitError>;
}

/// Posts the form to a running server's `/api/contact`.
#[derive(Debug, Clone)]
pub struct HttpContactClient {
    client: Client,
    endpoint: String,
}

impl HttpContactClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}/api/contact", base_url.trim_end_matches('/')),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl ContactClient for HttpContactClient {
    #[tracing::instrument(skip_all, fields(endpoint = %self.endpoint))]
    async fn submit(&self, payload: &ContactPayload) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint).json(payload).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<DispatchResult>()
            .await
            .ok()
            .map(|body| body.message)
            .filter(|message| !message.is_empty());

        tracing::warn!(%status, ?message, "Contact request rejected");

        Err(SubmitError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> ContactPayload {
        ContactPayload {
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            message: "Hello".to_owned(),
        }
    }

    #[tokio::test]
    async fn test_submit_posts_json_payload() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/contact")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "name": "Alice",
                "email": "alice@example.com",
                "message": "Hello"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":true,"message":"Message and email sent successfully!"}"#)
            .create_async()
            .await;

        let client = HttpContactClient::new(&format!("{}/", server.url()));
        client.submit(&payload()).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/contact")
            .with_status(500)
            .with_header("content-type", "application/json")
            .with_body(r#"{"success":false,"message":"Telegram sent, but failed to send Email."}"#)
            .create_async()
            .await;

        let client = HttpContactClient::new(&server.url());
        let err = client.submit(&payload()).await.unwrap_err();

        assert!(matches!(err, SubmitError::Rejected { status: 500, .. }));
        assert_eq!(
            err.server_message(),
            Some("Telegram sent, but failed to send Email.")
        );
    }

    #[tokio::test]
    async fn test_rejection_without_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/contact")
            .with_status(502)
            .with_body("bad gateway")
            .create_async()
            .await;

        let client = HttpContactClient::new(&server.url());
        let err = client.submit(&payload()).await.unwrap_err();

        assert_eq!(err.server_message(), None);
    }
}
