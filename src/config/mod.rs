use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub session: SessionConfig,
    pub queue: QueueConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub frontend_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout_secs: u64,
    pub run_migrations: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_hours: i64,
    pub cookie_secure: bool,
    pub activation_token_ttl_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueConfig {
    pub poll_interval_secs: u64,
    pub batch_size: i64,
    pub visibility_timeout_secs: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub api_base_url: String,
    pub api_key: String,
    pub company_name: String,
    pub support_email: String,
    pub from_welcome: String,
    pub from_support: String,
    pub from_noreply: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("FRONTEND_URL") {
            self.server.frontend_url = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout_secs =
                v.parse().unwrap_or(self.database.connection_timeout_secs);
        }
        if let Ok(v) = env::var("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Session overrides
        if let Ok(v) = env::var("SESSION_TTL_HOURS") {
            self.session.ttl_hours = v.parse().unwrap_or(self.session.ttl_hours);
        }
        if let Ok(v) = env::var("SESSION_COOKIE_SECURE") {
            self.session.cookie_secure = v.parse().unwrap_or(self.session.cookie_secure);
        }
        if let Ok(v) = env::var("ACTIVATION_TOKEN_TTL_SECS") {
            self.session.activation_token_ttl_secs =
                v.parse().unwrap_or(self.session.activation_token_ttl_secs);
        }

        // Queue overrides
        if let Ok(v) = env::var("QUEUE_POLL_INTERVAL_SECS") {
            self.queue.poll_interval_secs = v.parse().unwrap_or(self.queue.poll_interval_secs);
        }
        if let Ok(v) = env::var("QUEUE_BATCH_SIZE") {
            self.queue.batch_size = v.parse().unwrap_or(self.queue.batch_size);
        }
        if let Ok(v) = env::var("QUEUE_VISIBILITY_TIMEOUT_SECS") {
            self.queue.visibility_timeout_secs =
                v.parse().unwrap_or(self.queue.visibility_timeout_secs);
        }

        // Email overrides
        if let Ok(v) = env::var("EMAIL_API_BASE_URL") {
            self.email.api_base_url = v;
        }
        if let Ok(v) = env::var("EMAIL_API_KEY") {
            self.email.api_key = v;
        }
        if let Ok(v) = env::var("EMAIL_COMPANY_NAME") {
            self.email.company_name = v;
        }
        if let Ok(v) = env::var("EMAIL_SUPPORT_ADDRESS") {
            self.email.support_email = v;
        }
        if let Ok(v) = env::var("FROM_EMAIL_WELCOME") {
            self.email.from_welcome = v;
        }
        if let Ok(v) = env::var("FROM_EMAIL_SUPPORT") {
            self.email.from_support = v;
        }
        if let Ok(v) = env::var("FROM_EMAIL_NOREPLY") {
            self.email.from_noreply = v;
        }

        self
    }

    fn base_email() -> EmailConfig {
        EmailConfig {
            api_base_url: "https://api.resend.com".to_string(),
            api_key: String::new(),
            company_name: "Your School Management Platform".to_string(),
            support_email: "support@abdulamite.me".to_string(),
            from_welcome: "welcome@abdulamite.me".to_string(),
            from_support: "support@abdulamite.me".to_string(),
            from_noreply: "noreply@abdulamite.me".to_string(),
        }
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 3000,
                frontend_url: "http://localhost:5173".to_string(),
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout_secs: 30,
                run_migrations: true,
            },
            session: SessionConfig {
                cookie_name: "authenticated_session".to_string(),
                ttl_hours: 24,
                cookie_secure: false,
                activation_token_ttl_secs: 3600,
            },
            queue: QueueConfig {
                poll_interval_secs: 10,
                batch_size: 10,
                visibility_timeout_secs: 30,
            },
            email: Self::base_email(),
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout_secs: 10,
                run_migrations: true,
            },
            session: SessionConfig {
                cookie_secure: true,
                ..Self::development().session
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout_secs: 5,
                run_migrations: false,
            },
            session: SessionConfig {
                cookie_secure: true,
                ..Self::development().session
            },
            ..Self::development()
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
