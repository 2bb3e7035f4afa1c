// src/config.rs
use std::collections::HashMap;
use std::net::IpAddr;

use http::HeaderValue;
use thiserror::Error;

const DEFAULT_DATABASE_URL: &str = "sqlite://database.sqlite3?mode=rwc";
const DEFAULT_MAIL_SERVER: &str = "smtp.gmail.com";
const DEFAULT_MAIL_PORT: u16 = 465;
const DEFAULT_BUSINESS_NAME: &str = "Inventory Business LTD";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// TLS from the first byte (usually port 465).
    Ssl,
    StartTls,
    None,
}

#[derive(Debug, Clone)]
pub struct MailConfig {
    pub username: String,
    pub password: String,
    pub from: String,
    pub server: String,
    pub port: u16,
    pub security: SmtpSecurity,
    pub business_name: String,
}

/// Process configuration. Built once at startup and never reloaded.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub mail: MailConfig,
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |name: &str| {
            vars.get(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let host = match get("HOST") {
            Some(raw) => raw.parse::<IpAddr>().map_err(|e| ConfigError::Invalid {
                name: "HOST",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => IpAddr::from([127, 0, 0, 1]),
        };
        let port = parse_port("PORT", get("PORT"), 8000)?;

        let username = get("EMAIL").ok_or(ConfigError::Missing("EMAIL"))?;
        let password = get("PASS").ok_or(ConfigError::Missing("PASS"))?;
        let from = get("MAIL_FROM").unwrap_or_else(|| username.clone());
        let security = match get("MAIL_SECURITY") {
            Some(raw) => parse_security(&raw)?,
            None => SmtpSecurity::Ssl,
        };

        let mail = MailConfig {
            username,
            password,
            from,
            server: get("MAIL_SERVER").unwrap_or_else(|| DEFAULT_MAIL_SERVER.to_string()),
            port: parse_port("MAIL_PORT", get("MAIL_PORT"), DEFAULT_MAIL_PORT)?,
            security,
            business_name: get("MAIL_BUSINESS_NAME")
                .unwrap_or_else(|| DEFAULT_BUSINESS_NAME.to_string()),
        };

        let cors_origins = parse_origins(get("CORS_ORIGINS").as_deref().unwrap_or(""))?;

        Ok(Self {
            database_url,
            host,
            port,
            mail,
            cors_origins,
        })
    }
}

fn parse_port(name: &'static str, raw: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match raw {
        Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
            name,
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn parse_security(raw: &str) -> Result<SmtpSecurity, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "ssl" | "tls" => Ok(SmtpSecurity::Ssl),
        "starttls" => Ok(SmtpSecurity::StartTls),
        "none" => Ok(SmtpSecurity::None),
        _ => Err(ConfigError::Invalid {
            name: "MAIL_SECURITY",
            value: raw.to_string(),
            reason: "expected one of: ssl, starttls, none".to_string(),
        }),
    }
}

fn parse_origins(raw: &str) -> Result<Vec<HeaderValue>, ConfigError> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            if origin == "*" {
                return Err(ConfigError::Invalid {
                    name: "CORS_ORIGINS",
                    value: origin.to_string(),
                    reason: "wildcard cannot be combined with credentials".to_string(),
                });
            }
            HeaderValue::from_str(origin).map_err(|e| ConfigError::Invalid {
                name: "CORS_ORIGINS",
                value: origin.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_only_credentials_are_set() {
        let config = Config::from_vars(vars(&[("EMAIL", "shop@example.com"), ("PASS", "secret")]))
            .unwrap();

        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.port, 8000);
        assert_eq!(config.mail.from, "shop@example.com");
        assert_eq!(config.mail.server, "smtp.gmail.com");
        assert_eq!(config.mail.port, 465);
        assert_eq!(config.mail.security, SmtpSecurity::Ssl);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = Config::from_vars(vars(&[
            ("EMAIL", "shop@example.com"),
            ("PASS", "secret"),
            ("CORS_ORIGINS", "http://localhost:3000, https://shop.example.com,"),
        ]))
        .unwrap();

        assert_eq!(
            config.cors_origins,
            vec![
                HeaderValue::from_static("http://localhost:3000"),
                HeaderValue::from_static("https://shop.example.com"),
            ]
        );
    }

    #[test]
    fn missing_credentials_are_rejected() {
        let err = Config::from_vars(vars(&[("EMAIL", "shop@example.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("PASS")));
    }

    #[test]
    fn bad_values_are_rejected() {
        let err = Config::from_vars(vars(&[
            ("EMAIL", "shop@example.com"),
            ("PASS", "secret"),
            ("MAIL_PORT", "smtp"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MAIL_PORT", .. }));

        let err = Config::from_vars(vars(&[
            ("EMAIL", "shop@example.com"),
            ("PASS", "secret"),
            ("MAIL_SECURITY", "carrier-pigeon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "MAIL_SECURITY", .. }));
    }

    #[test]
    fn wildcard_origin_is_rejected() {
        let err = parse_origins("http://localhost:3000,*").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "CORS_ORIGINS", .. }));
    }

    #[test]
    fn starttls_is_recognised() {
        assert_eq!(parse_security("STARTTLS").unwrap(), SmtpSecurity::StartTls);
        assert_eq!(parse_security("none").unwrap(), SmtpSecurity::None);
    }
}
