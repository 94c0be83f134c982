use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub smtp: Option<SmtpConfig>,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub pass: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = env_required("DATABASE_URL")?;

        let host: IpAddr = env_or("ROLEPLAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid ROLEPLAY_HOST: {e}"))?;

        let port: u16 = env_or("ROLEPLAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid ROLEPLAY_PORT: {e}"))?;

        let log_level = env_or("ROLEPLAY_LOG_LEVEL", "info");

        let smtp = match (
            std::env::var("ROLEPLAY_SMTP_HOST").ok(),
            std::env::var("ROLEPLAY_SMTP_PORT").ok(),
            std::env::var("ROLEPLAY_SMTP_USER").ok(),
            std::env::var("ROLEPLAY_SMTP_PASS").ok(),
        ) {
            (Some(host), Some(port), Some(user), Some(pass)) => Some(SmtpConfig {
                host,
                port: port
                    .parse()
                    .map_err(|e| format!("Invalid ROLEPLAY_SMTP_PORT: {e}"))?,
                user,
                pass,
            }),
            _ => None,
        };

        Ok(Config {
            database_url,
            host,
            port,
            log_level,
            smtp,
        })
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
