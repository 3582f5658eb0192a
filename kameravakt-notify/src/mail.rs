//! SMTP delivery of event notifications.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use kameravakt_core::events::Event;

use crate::notifier::{Notifier, NotifyError};

/// Mail delivery parameters, taken from the `mail` configuration
/// section.
#[derive(Clone, Debug)]
pub struct MailSettings {
    pub from: String,
    pub to: Vec<String>,
    pub server: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Sends one e-mail per notified event over SMTP with STARTTLS.
pub struct MailNotifier {
    settings: MailSettings,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl MailNotifier {
    pub fn new(settings: MailSettings) -> Result<Self, NotifyError> {
        let credentials =
            Credentials::new(settings.username.clone(), settings.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.server)?
            .port(settings.port)
            .credentials(credentials)
            .build();
        Ok(Self {
            settings,
            transport,
        })
    }

    fn compose(&self, event: &Event, at: DateTime<Utc>) -> Result<Message, NotifyError> {
        let mut builder = Message::builder()
            .from(self.settings.from.parse::<Mailbox>()?)
            .subject(format!("[NVR] Event in '{}'", event.camera.name))
            .header(ContentType::TEXT_HTML);
        for to in &self.settings.to {
            builder = builder.to(to.parse::<Mailbox>()?);
        }

        let body = format!(
            "Event: {}<br>State: {}<br>Count: {}<br>At: {}<br>In: {}<br>Url: {}",
            event.kind, event.state, event.count, at, event.camera.name, event.camera.url
        );
        Ok(builder.body(body)?)
    }
}

#[async_trait]
impl Notifier for MailNotifier {
    async fn notify(&self, event: &Event, at: DateTime<Utc>) -> Result<(), NotifyError> {
        let message = self.compose(event, at)?;
        self.transport.send(message).await?;
        info!(
            camera = %event.camera.name,
            kind = %event.kind,
            "notification delivered"
        );
        Ok(())
    }
}
