use std::time::Duration;

use async_trait::async_trait;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{Mailbox, header::ContentType},
    transport::smtp::authentication::Credentials,
};
use tracing::info;

use crate::{
    config::{EmailConfig, SmtpConfig},
    error::NotifyError,
    services::Notifier,
};

pub const SUBJECT: &str = "Pipeline completado";
// TODO: include the loaded quote once the report format is agreed on
pub const BODY: &str = "Resumen de acciones";
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Clone, Debug)]
pub struct SmtpNotifier {
    smtp: SmtpConfig,
    email: EmailConfig,
}

impl SmtpNotifier {
    pub fn new(smtp: SmtpConfig, email: EmailConfig) -> Self {
        Self { smtp, email }
    }

    pub fn build_message(&self) -> Result<Message, NotifyError> {
        Message::builder()
            .from(parse_mailbox(self.email.sender())?)
            .to(parse_mailbox(self.email.receiver())?)
            .subject(SUBJECT)
            .header(ContentType::TEXT_PLAIN)
            .body(String::from(BODY))
            .map_err(|e| NotifyError::Message(e.to_string()))
    }

    fn transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, NotifyError> {
        let credentials = Credentials::new(
            self.smtp.username().clone(),
            self.smtp.password().clone(),
        );

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(self.smtp.server())
            .map_err(|e| NotifyError::Delivery(e.to_string()))?
            .port(*self.smtp.port())
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(transport)
    }

    pub async fn send(&self) -> Result<(), NotifyError> {
        let message = self.build_message()?;
        let mailer = self.transport()?;

        info!(
            server = %self.smtp.server(),
            port = *self.smtp.port(),
            receiver = %self.email.receiver(),
            "Sending completion email"
        );

        mailer
            .send(message)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        info!("Completion email sent");
        Ok(())
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifyError> {
    address
        .parse::<Mailbox>()
        .map_err(|e| NotifyError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(&self) -> Result<(), NotifyError> {
        self.send().await
    }
}
