use super::{env_flag, env_or, env_parse_or};

#[derive(Clone, Debug)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
    pub frontend_url: String,
}

impl EmailConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: env_flag("SMTP_ENABLED", false),
            smtp_host: env_or("SMTP_HOST", "localhost"),
            smtp_port: env_parse_or("SMTP_PORT", 1025),
            smtp_username: env_or("SMTP_USERNAME", ""),
            smtp_password: env_or("SMTP_PASSWORD", ""),
            from_email: env_or("FROM_EMAIL", "noreply@dealdesk.io"),
            from_name: env_or("FROM_NAME", "Dealdesk"),
            frontend_url: env_or("FRONTEND_URL", "http://localhost:3000"),
        }
    }
}
