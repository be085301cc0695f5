use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tera::Context;

use crate::certificate::{CertificateData, Field, Section};
use crate::mail::EmailRequest;
use crate::state::AppState;
use crate::wizard::{Action, Step, Wizard, WizardError};

pub async fn index() -> Response {
    render_template("login.html", &Context::new())
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    tokio::time::sleep(state.config.simulated_delay).await;

    let query = serde_urlencoded::to_string([("email", form.email.trim())]).unwrap_or_default();
    Redirect::to(&format!("/certificate?{}", query)).into_response()
}

#[derive(Deserialize)]
pub struct CarriedEmail {
    email: Option<String>,
}

pub async fn certificate_form(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CarriedEmail>,
) -> Response {
    render_wizard(&state, &Wizard::start(query.email))
}

#[derive(Deserialize)]
pub struct WizardForm {
    #[serde(flatten)]
    data: CertificateData,
    #[serde(default)]
    email: String,
    #[serde(default)]
    recipient: String,
}

impl WizardForm {
    fn resume(self, step: Step) -> (Wizard, String) {
        (Wizard::resume(step, self.data, Some(self.email)), self.recipient)
    }

    // Fields that differ from the default record become edits.
    fn edits(self) -> Result<Wizard, WizardError> {
        let mut wizard = Wizard::start(Some(self.email));
        for field in Field::ALL {
            let value = self.data.get(field);
            if value != wizard.data.get(field) {
                wizard = wizard.apply(Action::Edit(field, value.to_string()))?;
            }
        }
        Ok(wizard)
    }
}

pub async fn generate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let wizard = match form.edits() {
        Ok(w) => w,
        Err(e) => return wizard_error(e),
    };
    tokio::time::sleep(state.config.simulated_delay).await;
    transition(&state, wizard, Action::Generate)
}

pub async fn back(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, _) = form.resume(Step::Preview);
    transition(&state, wizard, Action::Back)
}

pub async fn open_email(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, _) = form.resume(Step::Preview);
    transition(&state, wizard, Action::OpenEmail)
}

pub async fn close_email(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, _) = form.resume(Step::Preview);
    transition(&state, wizard, Action::CloseEmail)
}

pub async fn email_certificate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, recipient) = form.resume(Step::Preview);
    let wizard = match wizard
        .apply(Action::OpenEmail)
        .and_then(|w| w.apply(Action::SetRecipient(recipient)))
    {
        Ok(w) => w,
        Err(e) => return wizard_error(e),
    };

    let recipient = match wizard.confirm_send().map(str::to_string) {
        Ok(r) => r,
        Err(e @ WizardError::EmptyRecipient) => {
            return transition(&state, wizard, Action::SendFailed(e.to_string()))
        }
        Err(e) => return wizard_error(e),
    };

    let pdf = match state.exporter.export_pdf(&wizard.data).await {
        Ok(pdf) => pdf,
        Err(e) => {
            tracing::error!("PDF export for email failed: {}", e);
            return transition(
                &state,
                wizard,
                Action::SendFailed("Could not generate the certificate PDF".to_string()),
            );
        }
    };

    let request = EmailRequest {
        recipient,
        pdf_data: pdf.data_uri(),
        student_name: wizard.data.student_name.clone(),
    };
    match state.transmission.send(request).await {
        Ok(()) => transition(&state, wizard, Action::SendSucceeded),
        Err(_) => transition(
            &state,
            wizard,
            Action::SendFailed("Failed to send email".to_string()),
        ),
    }
}

pub async fn download_pdf(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, _) = form.resume(Step::Preview);

    match state.exporter.export_pdf(&wizard.data).await {
        Ok(pdf) => (
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, attachment_disposition(&pdf.filename)),
            ],
            pdf.bytes,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("PDF export failed: {}", e);
            failed(&state, wizard, "Download PDF")
        }
    }
}

pub async fn print(
    State(state): State<Arc<AppState>>,
    Form(form): Form<WizardForm>,
) -> Response {
    let (wizard, _) = form.resume(Step::Preview);

    match state.exporter.print_page(&wizard.data) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Print page failed: {}", e);
            failed(&state, wizard, "Print")
        }
    }
}

// Printable-ASCII `filename` plus the exact name as RFC 5987 `filename*`.
fn attachment_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    let mut encoded = String::with_capacity(filename.len());
    for byte in filename.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'!'
            | b'#'
            | b'$'
            | b'&'
            | b'+'
            | b'-'
            | b'.'
            | b'^'
            | b'_'
            | b'`'
            | b'|'
            | b'~' => encoded.push(byte as char),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

fn transition(state: &AppState, wizard: Wizard, action: Action) -> Response {
    match wizard.apply(action) {
        Ok(next) => render_wizard(state, &next),
        Err(e) => wizard_error(e),
    }
}

fn failed(state: &AppState, wizard: Wizard, action: &'static str) -> Response {
    let mut response = transition(state, wizard, Action::ActionFailed(action));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
}

fn wizard_error(e: WizardError) -> Response {
    tracing::warn!("Rejected wizard action: {}", e);
    (StatusCode::BAD_REQUEST, e.to_string()).into_response()
}

#[derive(Serialize)]
struct FieldView {
    name: &'static str,
    label: &'static str,
    value: String,
    multiline: bool,
}

#[derive(Serialize)]
struct SectionView {
    heading: &'static str,
    fields: Vec<FieldView>,
}

fn field_view(data: &CertificateData, field: Field) -> FieldView {
    FieldView {
        name: field.name(),
        label: field.label(),
        value: data.get(field).to_string(),
        multiline: field.is_multiline(),
    }
}

fn render_wizard(state: &AppState, wizard: &Wizard) -> Response {
    let mut ctx = Context::new();
    ctx.insert("step", &wizard.step);
    ctx.insert("email", &wizard.carried_email.clone().unwrap_or_default());
    ctx.insert("notice", &wizard.notice);
    ctx.insert("modal", &wizard.modal);

    match wizard.step {
        Step::Form => {
            let sections: Vec<SectionView> = Section::ALL
                .into_iter()
                .map(|section| SectionView {
                    heading: section.heading(),
                    fields: Field::ALL
                        .into_iter()
                        .filter(|f| f.section() == section)
                        .map(|f| field_view(&wizard.data, f))
                        .collect(),
                })
                .collect();
            ctx.insert("sections", &sections);
            render_template("form.html", &ctx)
        }
        Step::Preview => {
            let hidden: Vec<FieldView> = Field::ALL
                .into_iter()
                .map(|f| field_view(&wizard.data, f))
                .collect();
            ctx.insert("hidden", &hidden);
            ctx.insert("svg", &state.exporter.svg(&wizard.data));
            ctx.insert("student_name", &wizard.data.student_name);
            render_template("preview.html", &ctx)
        }
    }
}

fn render_template(name: &str, ctx: &Context) -> Response {
    let tera = crate::templates::get_tera();
    match tera.render(name, ctx) {
        Ok(rendered) => Html(rendered).into_response(),
        Err(e) => {
            tracing::error!("Template error in {}: {}", name, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", name),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_passes_through() {
        assert_eq!(
            attachment_disposition("Jane_Doe_CERTIFICATE.pdf"),
            "attachment; filename=\"Jane_Doe_CERTIFICATE.pdf\"; \
             filename*=UTF-8''Jane_Doe_CERTIFICATE.pdf"
        );
    }

    #[test]
    fn quotes_and_controls_never_reach_the_fallback() {
        let value = attachment_disposition("Jane_\"Q\"\\\u{1}Doe.pdf");
        assert!(value.starts_with("attachment; filename=\"Jane__Q___Doe.pdf\";"));
        assert!(value.ends_with("filename*=UTF-8''Jane_%22Q%22%5C%01Doe.pdf"));
        assert!(axum::http::HeaderValue::from_str(&value).is_ok());
    }

    #[test]
    fn non_ascii_is_percent_encoded() {
        let value = attachment_disposition("Zoë_Doe_CERTIFICATE.pdf");
        assert!(value.contains("filename=\"Zo__Doe_CERTIFICATE.pdf\""));
        assert!(value.contains("filename*=UTF-8''Zo%C3%AB_Doe_CERTIFICATE.pdf"));
        assert!(value.is_ascii());
    }

    #[test]
    fn posted_form_is_replayed_as_edits() {
        let mut data = CertificateData::default();
        data.student_name = "Jane Doe".to_string();
        data.guide_name = String::new();
        let form = WizardForm {
            data: data.clone(),
            email: "jane@example.org".to_string(),
            recipient: String::new(),
        };

        let wizard = form.edits().unwrap();
        assert_eq!(wizard.step, Step::Form);
        assert_eq!(wizard.data, data);
        assert_eq!(wizard.carried_email.as_deref(), Some("jane@example.org"));
    }
}
