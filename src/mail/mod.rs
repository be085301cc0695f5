mod message;
mod smtp;

pub use message::{
    decode_data_uri, EmailRequest, MailAttachment, OutgoingMail, PDF_CONTENT_TYPE, SUBJECT,
};
pub use smtp::SmtpMailer;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid PDF payload: {0}")]
    Payload(String),

    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(String),

    #[error("mail relay account is not configured")]
    NotConfigured,

    #[error("SMTP error: {0}")]
    Relay(String),
}

impl MailError {
    pub fn is_validation(&self) -> bool {
        matches!(self, MailError::MissingField(_))
    }
}

/// Outbound mail transport.
#[async_trait]
pub trait MailClient: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError>;
}

#[derive(Clone)]
pub struct TransmissionService {
    client: Arc<dyn MailClient>,
}

impl TransmissionService {
    pub fn new(client: Arc<dyn MailClient>) -> Self {
        Self { client }
    }

    pub async fn send(&self, request: EmailRequest) -> Result<(), MailError> {
        request.validate()?;
        let mail = request.compose()?;
        let filename = mail.attachment.filename.clone();

        match self.client.send(mail).await {
            Ok(()) => {
                tracing::info!("Sent {}", filename);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Email sending error: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutgoingMail>>,
        fail: bool,
    }

    #[async_trait]
    impl MailClient for Recorder {
        async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
            if self.fail {
                return Err(MailError::Relay("535 authentication failed".to_string()));
            }
            self.sent.lock().unwrap().push(mail);
            Ok(())
        }
    }

    fn request(recipient: &str) -> EmailRequest {
        EmailRequest {
            recipient: recipient.to_string(),
            pdf_data: "data:application/pdf;base64,JVBERi0=".to_string(),
            student_name: "Jane Doe".to_string(),
        }
    }

    #[tokio::test]
    async fn delivers_one_message() {
        let recorder = Arc::new(Recorder::default());
        let service = TransmissionService::new(recorder.clone());

        service.send(request("jane@example.org")).await.unwrap();

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].attachment.filename, "Jane_Doe_CERTIFICATE.pdf");
    }

    #[tokio::test]
    async fn blank_recipient_never_reaches_client() {
        let recorder = Arc::new(Recorder::default());
        let service = TransmissionService::new(recorder.clone());

        let err = service.send(request("")).await.unwrap_err();
        assert!(err.is_validation());
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn undecodable_payload_never_reaches_client() {
        let recorder = Arc::new(Recorder::default());
        let service = TransmissionService::new(recorder.clone());
        let mut req = request("jane@example.org");
        req.pdf_data = "data:application/pdf;base64,%%%".to_string();

        let err = service.send(req).await.unwrap_err();
        assert!(!err.is_validation());
        assert!(recorder.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn relay_failure_is_reported() {
        let recorder = Arc::new(Recorder {
            fail: true,
            ..Recorder::default()
        });
        let service = TransmissionService::new(recorder);

        let err = service.send(request("jane@example.org")).await.unwrap_err();
        assert!(matches!(err, MailError::Relay(_)));
    }

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn delivery_log_omits_recipient() {
        let logs = LogBuffer::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let service = TransmissionService::new(Arc::new(Recorder::default()));
        service.send(request("jane@example.org")).await.unwrap();

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Jane_Doe_CERTIFICATE.pdf"));
        assert!(!output.contains("jane@example.org"));
    }
}
