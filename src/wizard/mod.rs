use serde::Serialize;
use thiserror::Error;

use crate::certificate::{CertificateData, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Form,
    Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailModal {
    pub recipient: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Edit(Field, String),
    Generate,
    Back,
    OpenEmail,
    SetRecipient(String),
    CloseEmail,
    SendSucceeded,
    SendFailed(String),
    ActionFailed(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WizardError {
    #[error("fields can only be edited on the form")]
    NotEditable,

    #[error("{0} is not available on the {1:?} step")]
    WrongStep(&'static str, Step),

    #[error("the email dialog is not open")]
    ModalClosed,

    #[error("Please enter an email address")]
    EmptyRecipient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    pub step: Step,
    pub data: CertificateData,
    pub carried_email: Option<String>,
    pub modal: Option<EmailModal>,
    pub notice: Option<Notice>,
}

impl Wizard {
    pub fn start(carried_email: Option<String>) -> Self {
        Self::resume(Step::Form, CertificateData::default(), carried_email)
    }

    pub fn resume(step: Step, data: CertificateData, carried_email: Option<String>) -> Self {
        Self {
            step,
            data,
            carried_email: carried_email.filter(|e| !e.trim().is_empty()),
            modal: None,
            notice: None,
        }
    }

    fn require(&self, action: &'static str, step: Step) -> Result<(), WizardError> {
        if self.step == step {
            Ok(())
        } else {
            Err(WizardError::WrongStep(action, self.step))
        }
    }

    pub fn apply(mut self, action: Action) -> Result<Self, WizardError> {
        match action {
            Action::Edit(field, value) => {
                if self.step != Step::Form {
                    return Err(WizardError::NotEditable);
                }
                self.data.set(field, value);
                self.notice = None;
            }
            Action::Generate => {
                self.require("Generate", Step::Form)?;
                self.step = Step::Preview;
                self.notice = None;
            }
            Action::Back => {
                self.require("Back", Step::Preview)?;
                self.step = Step::Form;
                self.modal = None;
                self.notice = None;
            }
            Action::OpenEmail => {
                self.require("Email", Step::Preview)?;
                if self.modal.is_none() {
                    self.modal = Some(EmailModal {
                        recipient: self.carried_email.clone().unwrap_or_default(),
                        error: None,
                    });
                }
                self.notice = None;
            }
            Action::SetRecipient(recipient) => {
                let modal = self.modal.as_mut().ok_or(WizardError::ModalClosed)?;
                modal.recipient = recipient;
                modal.error = None;
            }
            Action::CloseEmail => {
                self.modal = None;
            }
            Action::SendSucceeded => {
                let modal = self.modal.take().ok_or(WizardError::ModalClosed)?;
                self.notice = Some(Notice {
                    kind: NoticeKind::Success,
                    message: format!("Certificate sent to {}", modal.recipient.trim()),
                });
            }
            Action::SendFailed(reason) => {
                let modal = self.modal.as_mut().ok_or(WizardError::ModalClosed)?;
                modal.error = Some(reason);
            }
            Action::ActionFailed(name) => {
                self.notice = Some(Notice {
                    kind: NoticeKind::Error,
                    message: format!("{} failed. Please try again.", name),
                });
            }
        }
        Ok(self)
    }

    pub fn confirm_send(&self) -> Result<&str, WizardError> {
        self.require("Send", Step::Preview)?;
        let modal = self.modal.as_ref().ok_or(WizardError::ModalClosed)?;
        let recipient = modal.recipient.trim();
        if recipient.is_empty() {
            return Err(WizardError::EmptyRecipient);
        }
        Ok(recipient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> Wizard {
        Wizard::start(None).apply(Action::Generate).unwrap()
    }

    #[test]
    fn starts_on_form_with_defaults() {
        let wizard = Wizard::start(Some("jane@example.org".to_string()));
        assert_eq!(wizard.step, Step::Form);
        assert_eq!(wizard.data, CertificateData::default());
        assert_eq!(wizard.carried_email.as_deref(), Some("jane@example.org"));
    }

    #[test]
    fn blank_carried_email_is_dropped() {
        assert_eq!(Wizard::start(Some("  ".to_string())).carried_email, None);
    }

    #[test]
    fn back_preserves_every_field() {
        let mut wizard = Wizard::start(None);
        for field in Field::ALL {
            wizard = wizard
                .apply(Action::Edit(field, format!("edited {}", field.name())))
                .unwrap();
        }
        let before = wizard.data.clone();

        let wizard = wizard
            .apply(Action::Generate)
            .unwrap()
            .apply(Action::Back)
            .unwrap();
        assert_eq!(wizard.step, Step::Form);
        assert_eq!(wizard.data, before);
    }

    #[test]
    fn preview_is_read_only() {
        let err = preview()
            .apply(Action::Edit(Field::StudentName, "x".to_string()))
            .unwrap_err();
        assert_eq!(err, WizardError::NotEditable);
    }

    #[test]
    fn wrong_step_actions_are_rejected() {
        assert!(matches!(
            Wizard::start(None).apply(Action::Back),
            Err(WizardError::WrongStep("Back", Step::Form))
        ));
        assert!(matches!(
            preview().apply(Action::Generate),
            Err(WizardError::WrongStep("Generate", Step::Preview))
        ));
        assert!(Wizard::start(None).apply(Action::OpenEmail).is_err());
    }

    #[test]
    fn email_dialog_prefills_carried_address() {
        let wizard = Wizard::start(Some("jane@example.org".to_string()))
            .apply(Action::Generate)
            .unwrap()
            .apply(Action::OpenEmail)
            .unwrap();
        assert_eq!(wizard.modal.unwrap().recipient, "jane@example.org");
    }

    #[test]
    fn empty_recipient_blocks_send() {
        let wizard = preview().apply(Action::OpenEmail).unwrap();
        assert_eq!(wizard.confirm_send(), Err(WizardError::EmptyRecipient));

        let wizard = wizard
            .apply(Action::SetRecipient("   ".to_string()))
            .unwrap();
        assert_eq!(wizard.confirm_send(), Err(WizardError::EmptyRecipient));
    }

    #[test]
    fn send_requires_open_dialog() {
        assert_eq!(preview().confirm_send(), Err(WizardError::ModalClosed));
        assert_eq!(
            preview().apply(Action::SendSucceeded),
            Err(WizardError::ModalClosed)
        );
    }

    #[test]
    fn success_closes_dialog_and_failure_keeps_it() {
        let open = preview()
            .apply(Action::OpenEmail)
            .unwrap()
            .apply(Action::SetRecipient("jane@example.org".to_string()))
            .unwrap();
        assert_eq!(open.confirm_send(), Ok("jane@example.org"));

        let failed = open
            .clone()
            .apply(Action::SendFailed("Failed to send email".to_string()))
            .unwrap();
        let modal = failed.modal.as_ref().unwrap();
        assert_eq!(modal.recipient, "jane@example.org");
        assert_eq!(modal.error.as_deref(), Some("Failed to send email"));

        let sent = open.apply(Action::SendSucceeded).unwrap();
        assert!(sent.modal.is_none());
        let notice = sent.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert!(notice.message.contains("jane@example.org"));
    }

    #[test]
    fn back_closes_dialog() {
        let wizard = preview()
            .apply(Action::OpenEmail)
            .unwrap()
            .apply(Action::Back)
            .unwrap();
        assert!(wizard.modal.is_none());
    }

    #[test]
    fn failed_action_is_named() {
        let wizard = preview().apply(Action::ActionFailed("Download PDF")).unwrap();
        let notice = wizard.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.starts_with("Download PDF failed"));
    }
}
