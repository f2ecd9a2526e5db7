use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub environment: String,
    pub session_secure_cookie: bool,
    pub session_inactivity_secs: i64,
    pub log_requests: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/feedback.db".to_string());

        let database_max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .map_err(|_| "Invalid DATABASE_MAX_CONNECTIONS")?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let session_secure_cookie = parse_bool(
            &env::var("SESSION_SECURE_COOKIE").unwrap_or_else(|_| "false".to_string()),
        )
        .ok_or("Invalid SESSION_SECURE_COOKIE")?;

        let session_inactivity_secs = env::var("SESSION_INACTIVITY_SECS")
            .unwrap_or_else(|_| "86400".to_string())
            .parse()
            .map_err(|_| "Invalid SESSION_INACTIVITY_SECS")?;

        let log_requests =
            parse_bool(&env::var("LOG_REQUESTS").unwrap_or_else(|_| "true".to_string()))
                .ok_or("Invalid LOG_REQUESTS")?;

        Ok(Config {
            server_host,
            server_port,
            database_url,
            database_max_connections,
            environment,
            session_secure_cookie,
            session_inactivity_secs,
            log_requests,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Production deployments always get `Secure` session cookies
    pub fn secure_cookies(&self) -> bool {
        self.session_secure_cookie || self.environment == "production"
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
