use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone)]
pub struct MailAccount {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for MailAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailAccount")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub mail_account: Option<MailAccount>,
    pub mail_from: Option<String>,
    pub logo_path: Option<PathBuf>,
    pub font_dir: Option<PathBuf>,
    pub simulated_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            smtp_host: "smtp.gmail.com".to_string(),
            smtp_port: 587,
            mail_account: None,
            mail_from: None,
            logo_path: None,
            font_dir: None,
            simulated_delay: Duration::from_millis(800),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let host = std::env::var("HOST").unwrap_or(defaults.host);
        let port: u16 = numeric_var("PORT", std::env::var("PORT").ok(), defaults.port)?;

        let smtp_host = std::env::var("SMTP_HOST").unwrap_or(defaults.smtp_host);
        let smtp_port: u16 =
            numeric_var("SMTP_PORT", std::env::var("SMTP_PORT").ok(), defaults.smtp_port)?;

        let mail_account = match (std::env::var("EMAIL_USER"), std::env::var("EMAIL_PASS")) {
            (Ok(user), Ok(password)) if !user.is_empty() => Some(MailAccount { user, password }),
            _ => None,
        };
        let mail_from = std::env::var("EMAIL_FROM")
            .ok()
            .or_else(|| mail_account.as_ref().map(|a| a.user.clone()));

        let logo_path = std::env::var("LOGO_PATH").ok().map(PathBuf::from);
        let font_dir = std::env::var("FONT_DIR").ok().map(PathBuf::from);

        let simulated_delay = Duration::from_millis(numeric_var(
            "SIMULATED_DELAY_MS",
            std::env::var("SIMULATED_DELAY_MS").ok(),
            defaults.simulated_delay.as_millis() as u64,
        )?);

        Ok(Self {
            host,
            port,
            smtp_host,
            smtp_port,
            mail_account,
            mail_from,
            logo_path,
            font_dir,
            simulated_delay,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// Unset means the default; set but unparseable is a startup error.
fn numeric_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, String> {
    match raw {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{} must be a number, got {:?}", name, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_password_is_redacted_in_debug() {
        let account = MailAccount {
            user: "office@example.org".to_string(),
            password: "hunter2".to_string(),
        };
        let printed = format!("{:?}", account);
        assert!(printed.contains("office@example.org"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn unset_numeric_var_uses_default() {
        assert_eq!(numeric_var::<u16>("PORT", None, 5001), Ok(5001));
    }

    #[test]
    fn numeric_vars_share_one_policy() {
        assert_eq!(numeric_var::<u16>("PORT", Some(" 8080 ".to_string()), 5001), Ok(8080));
        for name in ["PORT", "SMTP_PORT"] {
            let err = numeric_var::<u16>(name, Some("http".to_string()), 1).unwrap_err();
            assert!(err.starts_with(name), "{}", err);
        }
        assert!(numeric_var::<u16>("PORT", Some("70000".to_string()), 5001).is_err());
        assert!(numeric_var::<u64>("SIMULATED_DELAY_MS", Some("-5".to_string()), 800).is_err());
    }
}
