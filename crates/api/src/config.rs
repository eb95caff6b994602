/// Process configuration from the environment.
///
/// Both knobs ship with insecure development defaults on purpose: the
/// literal secret and fixed port of the original deployment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt_secret: String,
    pub port: u16,
}

pub const DEFAULT_JWT_SECRET: &str = "dev-secret-change-this";
pub const DEFAULT_PORT: u16 = 3001;

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            DEFAULT_JWT_SECRET.to_string()
        });

        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { jwt_secret, port }
    }
}
