use clap::Parser;
use std::fmt;
use std::time::Duration;

use crate::mfl::client::{DEFAULT_EXPORT_URL, DEFAULT_LOGIN_URL};
use crate::mfl::{Credentials, Endpoints};

/// MyFantasyLeague playoff league pages over HTTP
#[derive(Parser, Clone)]
#[command(name = "mfl-league-client", version, about)]
pub struct Config {
    /// Trigger listen address
    #[arg(long, env = "TRIGGER_ADDR", default_value = "0.0.0.0:8080")]
    pub trigger_addr: String,

    /// MFL login host
    #[arg(long, env = "MFL_LOGIN_URL", default_value = DEFAULT_LOGIN_URL)]
    pub login_url: String,

    /// MFL export host serving the league
    #[arg(long, env = "MFL_EXPORT_URL", default_value = DEFAULT_EXPORT_URL)]
    pub export_url: String,

    /// Timeout for each request to the league host, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    pub http_timeout_secs: u64,

    /// MFL account username
    #[arg(long, env = "MFL_USERNAME")]
    pub username: Option<String>,

    /// MFL account password
    #[arg(long, env = "MFL_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("trigger_addr", &self.trigger_addr)
            .field("login_url", &self.login_url)
            .field("export_url", &self.export_url)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.username.as_deref().map_or(true, str::is_empty) {
            anyhow::bail!("MFL_USERNAME is required");
        }
        if self.password.as_deref().map_or(true, str::is_empty) {
            anyhow::bail!("MFL_PASSWORD is required");
        }
        if self.http_timeout_secs == 0 {
            anyhow::bail!("http_timeout_secs must be positive");
        }
        self.endpoints()?;
        Ok(())
    }

    pub fn endpoints(&self) -> anyhow::Result<Endpoints> {
        Endpoints::new(&self.login_url, &self.export_url)
            .map_err(|e| anyhow::anyhow!("invalid MFL host URL: {}", e))
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(
            self.username.clone().unwrap_or_default(),
            self.password.clone().unwrap_or_default(),
        )
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
