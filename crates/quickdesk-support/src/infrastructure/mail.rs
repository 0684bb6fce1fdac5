//! Mail delivery

use async_trait::async_trait;

use crate::ports::outbound::{MailError, Mailer};

/// Mailer that records outgoing messages in the log instead of relaying them.
pub struct LogMailer {
    from: String,
}

impl LogMailer {
    pub fn new(from: impl Into<String>) -> Self {
        Self { from: from.into() }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(from = %self.from, to, subject, body, "email queued");
        Ok(())
    }
}
