mod models;

pub use models::*;

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE: OnceLock<Regex> = OnceLock::new();

pub fn slug(name: &str) -> String {
    let re = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("static regex"));
    re.replace_all(name, "_").into_owned()
}

pub fn certificate_filename(student_name: &str) -> String {
    format!("{}_CERTIFICATE.pdf", slug(student_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_replaces_spaces() {
        assert_eq!(certificate_filename("Jane Doe"), "Jane_Doe_CERTIFICATE.pdf");
    }

    #[test]
    fn whitespace_runs_become_one_underscore() {
        assert_eq!(slug("Om   Prakash\tBhatia"), "Om_Prakash_Bhatia");
        assert_eq!(slug(" Jane "), "_Jane_");
        assert_eq!(slug(""), "");
    }

    #[test]
    fn slug_is_deterministic() {
        let name = "Ada  King Lovelace";
        assert_eq!(slug(name), slug(name));
    }

    #[test]
    fn every_field_round_trips_through_get_and_set() {
        let mut data = CertificateData::default();
        for field in Field::ALL {
            data.set(field, format!("value-{}", field.name()));
        }
        for field in Field::ALL {
            assert_eq!(data.get(field), format!("value-{}", field.name()));
            assert_eq!(Field::from_name(field.name()), Some(field));
        }
    }

    #[test]
    fn missing_fields_deserialize_blank() {
        let data: CertificateData =
            serde_json::from_str(r#"{"studentName":"Jane Doe"}"#).unwrap();
        assert_eq!(data.student_name, "Jane Doe");
        assert_eq!(data.ref_no, "");
        assert_eq!(data.sign_right_title, "");
    }

    #[test]
    fn defaults_are_populated() {
        let data = CertificateData::default();
        assert!(Field::ALL.iter().all(|f| !data.get(*f).is_empty()));
    }
}
