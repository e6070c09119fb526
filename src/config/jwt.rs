use std::env;

#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    /// Token lifetime in seconds. Sessions are fixed-expiry; there is no
    /// refresh flow.
    pub token_expiry: i64,
}

impl JwtConfig {
    pub fn from_env() -> Self {
        Self {
            // The fallback secret is a known weakness kept for parity with
            // dev setups; deployments must set JWT_SECRET.
            secret: env::var("JWT_SECRET").unwrap_or_else(|_| "your-secret-key".to_string()),
            token_expiry: env::var("JWT_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(86400), // 24 hours
        }
    }
}
