use base64::{engine::general_purpose::STANDARD as BASE64_STD, Engine as _};

use super::MailError;
use crate::certificate::certificate_filename;

pub const SUBJECT: &str = "Your Internship Certificate";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Clone)]
pub struct EmailRequest {
    pub recipient: String,
    pub pdf_data: String,
    pub student_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
    pub attachment: MailAttachment,
}

impl EmailRequest {
    pub(super) fn validate(&self) -> Result<(), MailError> {
        if self.recipient.trim().is_empty() {
            return Err(MailError::MissingField("email"));
        }
        if self.pdf_data.is_empty() {
            return Err(MailError::MissingField("pdfData"));
        }
        Ok(())
    }

    pub(super) fn compose(&self) -> Result<OutgoingMail, MailError> {
        let bytes = decode_data_uri(&self.pdf_data)?;
        Ok(OutgoingMail {
            to: self.recipient.trim().to_string(),
            subject: SUBJECT.to_string(),
            body: body_for(&self.student_name),
            attachment: MailAttachment {
                filename: certificate_filename(&self.student_name),
                content_type: PDF_CONTENT_TYPE.to_string(),
                bytes,
            },
        })
    }
}

fn body_for(student_name: &str) -> String {
    format!(
        "Dear {},\n\nPlease find attached your internship certificate.\n\nBest regards,\nIIIT Naya Raipur",
        student_name
    )
}

pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, MailError> {
    let comma = uri.find(',').ok_or_else(|| {
        MailError::Payload("missing `,` separator between header and data".to_string())
    })?;
    let payload = uri[comma + 1..].trim();
    if payload.is_empty() {
        return Err(MailError::Payload("data URI carries no data".to_string()));
    }
    BASE64_STD
        .decode(payload)
        .map_err(|e| MailError::Payload(format!("base64 decode error: {}", e)))
}
