use async_trait::async_trait;
use lettre::message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::{MailClient, MailError, OutgoingMail};
use crate::config::Config;

const IMPLICIT_TLS_PORT: u16 = 465;

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Option<Mailbox>,
}

impl SmtpMailer {
    pub fn new(config: &Config) -> Result<Self, MailError> {
        let relay = if config.smtp_port == IMPLICIT_TLS_PORT {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        };
        let builder = relay
            .map_err(|e| MailError::Relay(e.to_string()))?
            .port(config.smtp_port);

        let builder = match &config.mail_account {
            Some(account) => builder.credentials(Credentials::new(
                account.user.clone(),
                account.password.clone(),
            )),
            None => {
                tracing::warn!("EMAIL_USER/EMAIL_PASS not set, certificate emails will fail");
                builder
            }
        };

        let from = config
            .mail_from
            .as_deref()
            .map(|addr| {
                addr.parse::<Mailbox>()
                    .map_err(|e| MailError::InvalidAddress(format!("{}: {}", addr, e)))
            })
            .transpose()?;

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl MailClient for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        let from = self.from.clone().ok_or(MailError::NotConfigured)?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e| MailError::InvalidAddress(format!("{}: {}", mail.to, e)))?;
        let content_type = ContentType::parse(&mail.attachment.content_type)
            .map_err(|e| MailError::Build(e.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject)
            .multipart(
                MultiPart::mixed()
                    .singlepart(SinglePart::plain(mail.body))
                    .singlepart(
                        Attachment::new(mail.attachment.filename)
                            .body(mail.attachment.bytes, content_type),
                    ),
            )
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailError::Relay(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::MailAttachment;

    fn mail_to(to: &str) -> OutgoingMail {
        OutgoingMail {
            to: to.to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
            attachment: MailAttachment {
                filename: "x.pdf".to_string(),
                content_type: "application/pdf".to_string(),
                bytes: vec![1],
            },
        }
    }

    #[tokio::test]
    async fn unconfigured_sender_fails_before_connecting() {
        let mailer = SmtpMailer::new(&Config::default()).unwrap();
        let err = mailer.send(mail_to("jane@example.org")).await.unwrap_err();
        assert!(matches!(err, MailError::NotConfigured));
    }

    #[tokio::test]
    async fn malformed_recipient_fails_before_connecting() {
        let config = Config {
            mail_from: Some("office@example.org".to_string()),
            ..Config::default()
        };
        let mailer = SmtpMailer::new(&config).unwrap();
        let err = mailer.send(mail_to("not an address")).await.unwrap_err();
        assert!(matches!(err, MailError::InvalidAddress(_)));
    }

    #[test]
    fn malformed_sender_is_a_config_error() {
        let config = Config {
            mail_from: Some("nope".to_string()),
            ..Config::default()
        };
        assert!(matches!(
            SmtpMailer::new(&config),
            Err(MailError::InvalidAddress(_))
        ));
    }
}
