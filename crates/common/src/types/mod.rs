use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `GET /api/health`. Only reports whether things are configured,
/// never their values.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub database: String,
    pub database_url: String,
    pub jwt_secret: String,
}

impl Health {
    pub fn ok(environment: &str, db_connected: bool) -> Self {
        Self {
            status: "ok".into(),
            timestamp: Utc::now(),
            environment: environment.to_string(),
            database: presence(db_connected, "connected", "disconnected").into(),
            database_url: "missing".into(),
            jwt_secret: "missing".into(),
        }
    }

    pub fn with_config_flags(mut self, database_url_set: bool, jwt_secret_set: bool) -> Self {
        self.database_url = presence(database_url_set, "configured", "missing").into();
        self.jwt_secret = presence(jwt_secret_set, "configured", "missing").into();
        self
    }
}

/// `{ "message": ... }` acknowledgement used by delete and intake endpoints.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

/// Render a presence flag the way the health/debug endpoints expect.
pub fn presence(set: bool, yes: &'static str, no: &'static str) -> &'static str {
    if set { yes } else { no }
}
