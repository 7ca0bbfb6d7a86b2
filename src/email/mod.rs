use serde_json::json;
use tracing::debug;

/// Client for the hosted transactional-email HTTP API.
///
/// The provider is a plain JSON-over-HTTPS endpoint; failures are
/// stringly-typed at this boundary and mapped to one user-visible error by
/// the calling handler.
#[derive(Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from: String,
}

impl EmailClient {
    pub fn new(api_url: &str, api_key: &str, from: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
            from: from.to_string(),
        }
    }

    /// Build from `EMAIL_API_URL`, `EMAIL_API_KEY` and `EMAIL_FROM`.
    pub fn from_env() -> Self {
        let api_url = std::env::var("EMAIL_API_URL").expect("EMAIL_API_URL must be set");
        let api_key = std::env::var("EMAIL_API_KEY").expect("EMAIL_API_KEY must be set");
        let from = std::env::var("EMAIL_FROM").expect("EMAIL_FROM must be set");
        Self::new(&api_url, &api_key, &from)
    }

    /// Send one HTML email.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        debug!("Sending email to {to}: {subject}");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "from": self.from,
                "to": [to],
                "subject": subject,
                "html": html,
            }))
            .send()
            .await
            .map_err(|e| format!("Failed to send email: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("Email API returned HTTP {status}"));
        }

        Ok(())
    }
}
