use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub slot_duration_minutes: i64,
    pub average_service_minutes: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    warn!("PORT not set, defaulting to 3000");
                    3000
                }),
            slot_duration_minutes: env::var("SLOT_DURATION_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m| *m > 0)
                .unwrap_or_else(|| {
                    warn!("SLOT_DURATION_MINUTES not set, defaulting to 30");
                    30
                }),
            average_service_minutes: env::var("AVERAGE_SERVICE_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|m| *m >= 0)
                .unwrap_or_else(|| {
                    warn!("AVERAGE_SERVICE_MINUTES not set, defaulting to 15");
                    15
                }),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            slot_duration_minutes: 30,
            average_service_minutes: 15,
        }
    }
}
