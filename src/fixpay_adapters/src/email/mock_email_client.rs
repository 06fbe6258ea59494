use fixpay_core::{Email, EmailClient};

/// Email client that accepts everything and delivers nothing. Used in
/// development mode and tests.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "email delivery suppressed");
        Ok(())
    }
}
