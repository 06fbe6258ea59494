use fixpay_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

const AUTH_TOKEN_HEADER: &str = "X-Postmark-Server-Token";
const OUTBOUND_STREAM: &str = "outbound";

/// [`EmailClient`] backed by Postmark's `POST /email` endpoint. The
/// notification worker hands it fully rendered HTML, so messages go out
/// with an HTML body only.
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: String,
    sender: Email,
    authorization_token: Secret<String>,
}

/// Wire shape of a Postmark outbound message.
#[derive(Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct OutboundEmail<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html_body: &'a str,
    message_stream: &'static str,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: String,
        sender: Email,
        authorization_token: Secret<String>,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
        }
    }

    fn endpoint(&self) -> Result<Url, String> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join("/email"))
            .map_err(|e| format!("invalid Postmark base url: {e}"))
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all, fields(subject = %subject))]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let message = OutboundEmail {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            html_body: content,
            message_stream: OUTBOUND_STREAM,
        };

        let response = self
            .http_client
            .post(self.endpoint()?)
            .header(AUTH_TOKEN_HEADER, self.authorization_token.expose_secret())
            .json(&message)
            .send()
            .await
            .map_err(|e| format!("Postmark request failed: {e}"))?;

        response
            .error_for_status()
            .map(|_| ())
            .map_err(|e| format!("Postmark rejected the email: {e}"))
    }
}
