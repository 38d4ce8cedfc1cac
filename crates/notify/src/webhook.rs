use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use switchboard_core::domain::notification::{NotificationPayload, PublishReceipt};

use crate::channel::{ChannelError, NotificationChannel};

/// Publishes notifications to a webhook endpoint as a JSON document. The
/// receipt confirms the endpoint accepted the POST; what the subscriber does
/// with it afterwards is not this channel's business.
pub struct WebhookChannel {
    client: reqwest::Client,
    webhook_url: SecretString,
    timeout: Duration,
}

impl WebhookChannel {
    pub fn new(webhook_url: SecretString, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
            timeout: Duration::from_secs(timeout_secs.max(1)),
        }
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn publish(
        &self,
        payload: NotificationPayload,
    ) -> Result<PublishReceipt, ChannelError> {
        let response = self
            .client
            .post(self.webhook_url.expose_secret())
            .timeout(self.timeout)
            .json(&serde_json::json!({
                "subject": payload.subject,
                "body": payload.body,
            }))
            .send()
            .await
            .map_err(|error| ChannelError::Publish(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChannelError::Rejected(format!("endpoint returned {status}")));
        }

        Ok(PublishReceipt { message_id: format!("msg-{}", Uuid::new_v4().simple()) })
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;
    use switchboard_core::domain::notification::NotificationPayload;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::WebhookChannel;
    use crate::channel::{ChannelError, NotificationChannel};

    fn payload() -> NotificationPayload {
        NotificationPayload {
            subject: "Missed Call from Ada".to_string(),
            body: "call details".to_string(),
        }
    }

    #[tokio::test]
    async fn publish_posts_subject_and_body_as_json() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hooks/owner"))
            .and(body_partial_json(serde_json::json!({
                "subject": "Missed Call from Ada",
                "body": "call details",
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(
            SecretString::from(format!("{}/hooks/owner", server.uri())),
            5,
        );

        let receipt = channel.publish(payload()).await.expect("publish should be accepted");
        assert!(receipt.message_id.starts_with("msg-"));
    }

    #[tokio::test]
    async fn non_success_statuses_are_rejections() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/hooks/owner"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let channel = WebhookChannel::new(
            SecretString::from(format!("{}/hooks/owner", server.uri())),
            5,
        );

        let error = channel.publish(payload()).await.expect_err("publish should fail");
        assert!(matches!(error, ChannelError::Rejected(_)));
    }
}
