//! Site settings, stored as one JSON document per section.
//!
//! Reads fill missing sections with defaults. Writes overlay the submitted
//! keys onto the stored document and must deserialize into the section's
//! typed schema. The SMTP password is write-only.

use std::{collections::HashMap, fmt, str::FromStr};

use sea_orm::DatabaseConnection;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument, warn};

use models::setting;
use crate::errors::ServiceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Site,
    Contact,
    Email,
    Notifications,
    Security,
    Integrations,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Site,
        Section::Contact,
        Section::Email,
        Section::Notifications,
        Section::Security,
        Section::Integrations,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Section::Site => "site",
            Section::Contact => "contact",
            Section::Email => "email",
            Section::Notifications => "notifications",
            Section::Security => "security",
            Section::Integrations => "integrations",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Section::ALL
            .into_iter()
            .find(|sec| sec.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ServiceError::Validation(format!("Unknown settings section: {s}")))
    }
}

/// A typed settings document.
pub trait SectionDoc: Serialize + DeserializeOwned + Default {
    fn check(&self) -> Result<(), ServiceError> { Ok(()) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SiteSettings {
    pub name: String,
    pub description: String,
    pub url: String,
    pub logo: String,
    pub favicon: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "EagleMinds Technologies".into(),
            description: "Modern web development and SaaS solutions".into(),
            url: "https://eagleminds.net".into(),
            logo: "/logo.png".into(),
            favicon: "/favicon.ico".into(),
        }
    }
}

impl SectionDoc for SiteSettings {
    fn check(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::Validation("Site name is required".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ContactSettings {
    pub email: String,
    pub phone: String,
    pub address: String,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            email: "info@eagleminds.net".into(),
            phone: "+91 (44) 1234-5678".into(),
            address: "123 Tech Park Avenue, Anna Nagar, Chennai - 600040, Tamil Nadu, India".into(),
        }
    }
}

impl SectionDoc for ContactSettings {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_user: String,
    pub smtp_password: String,
    pub from_email: String,
    pub from_name: String,
}

impl Default for EmailSettings {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".into(),
            smtp_port: 587,
            smtp_user: "notifications@eagleminds.net".into(),
            smtp_password: String::new(),
            from_email: "noreply@eagleminds.net".into(),
            from_name: "EagleMinds Technologies".into(),
        }
    }
}

impl SectionDoc for EmailSettings {
    fn check(&self) -> Result<(), ServiceError> {
        if self.smtp_port == 0 {
            return Err(ServiceError::Validation("SMTP port must be between 1 and 65535".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub lead_notifications: bool,
    pub system_alerts: bool,
    pub marketing_emails: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { email_notifications: true, lead_notifications: true, system_alerts: true, marketing_emails: false }
    }
}

impl SectionDoc for NotificationSettings {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SecuritySettings {
    pub two_factor_auth: bool,
    pub session_timeout_hours: u32,
    pub password_policy: String,
    pub login_attempts: u32,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self { two_factor_auth: false, session_timeout_hours: 24, password_policy: "strong".into(), login_attempts: 5 }
    }
}

impl SectionDoc for SecuritySettings {
    fn check(&self) -> Result<(), ServiceError> {
        if !matches!(self.password_policy.as_str(), "weak" | "medium" | "strong") {
            return Err(ServiceError::Validation("Password policy must be weak, medium or strong".into()));
        }
        if self.session_timeout_hours == 0 || self.login_attempts == 0 {
            return Err(ServiceError::Validation("Session timeout and login attempts must be positive".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct IntegrationSettings {
    pub google_analytics: String,
    pub facebook_pixel: String,
    pub linkedin_insight: String,
    pub cloudinary_cloud_name: String,
    pub cloudinary_api_key: String,
}

impl SectionDoc for IntegrationSettings {}

/// Every section, as stored (secrets included). Never serialized to clients.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub site: SiteSettings,
    pub contact: ContactSettings,
    pub email: EmailSettings,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub integrations: IntegrationSettings,
}

/// Email settings as returned to the admin UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailSettingsView {
    #[serde(flatten)]
    pub settings: EmailSettings,
    pub smtp_password_set: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub site: SiteSettings,
    pub contact: ContactSettings,
    pub email: EmailSettingsView,
    pub notifications: NotificationSettings,
    pub security: SecuritySettings,
    pub integrations: IntegrationSettings,
}

impl Settings {
    /// Redacted copy for clients.
    pub fn view(&self) -> SettingsView {
        let smtp_password_set = !self.email.smtp_password.is_empty();
        SettingsView {
            site: self.site.clone(),
            contact: self.contact.clone(),
            email: EmailSettingsView {
                settings: EmailSettings { smtp_password: String::new(), ..self.email.clone() },
                smtp_password_set,
            },
            notifications: self.notifications.clone(),
            security: self.security.clone(),
            integrations: self.integrations.clone(),
        }
    }

    fn section_value(&self, section: Section) -> Result<Value, ServiceError> {
        let v = match section {
            Section::Site => serde_json::to_value(&self.site),
            Section::Contact => serde_json::to_value(&self.contact),
            Section::Email => serde_json::to_value(&self.email),
            Section::Notifications => serde_json::to_value(&self.notifications),
            Section::Security => serde_json::to_value(&self.security),
            Section::Integrations => serde_json::to_value(&self.integrations),
        };
        v.map_err(|e| ServiceError::Validation(e.to_string()))
    }
}

fn decode<T: SectionDoc>(rows: &HashMap<String, Value>, section: Section) -> T {
    match rows.get(section.key()) {
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            warn!(section = %section, error = %e, "stored settings unreadable, using defaults");
            T::default()
        }),
        None => T::default(),
    }
}

fn validated<T: SectionDoc>(section: Section, merged: Value) -> Result<Value, ServiceError> {
    let doc: T = serde_json::from_value(merged)
        .map_err(|e| ServiceError::Validation(format!("Invalid {section} settings: {e}")))?;
    doc.check()?;
    serde_json::to_value(&doc).map_err(|e| ServiceError::Validation(e.to_string()))
}

pub async fn load(db: &DatabaseConnection) -> Result<Settings, ServiceError> {
    let rows: HashMap<String, Value> = setting::all(db).await?.into_iter().map(|r| (r.key, r.value)).collect();
    Ok(Settings {
        site: decode(&rows, Section::Site),
        contact: decode(&rows, Section::Contact),
        email: decode(&rows, Section::Email),
        notifications: decode(&rows, Section::Notifications),
        security: decode(&rows, Section::Security),
        integrations: decode(&rows, Section::Integrations),
    })
}

/// Overlay `body` onto the stored section, validate, persist, and return
/// the full redacted settings.
#[instrument(skip(db, body))]
pub async fn update_section(db: &DatabaseConnection, section: Section, body: Value) -> Result<SettingsView, ServiceError> {
    let Value::Object(mut patch) = body else {
        return Err(ServiceError::Validation(format!("{section} settings must be a JSON object")));
    };
    if section == Section::Email {
        // read-only flag from the settings view
        patch.remove("smtpPasswordSet");
        // blank password means "unchanged"
        if matches!(patch.get("smtpPassword"), Some(Value::Null)) || matches!(patch.get("smtpPassword"), Some(Value::String(s)) if s.is_empty()) {
            patch.remove("smtpPassword");
        }
    }

    let current = load(db).await?;
    let mut merged = match current.section_value(section)? {
        Value::Object(m) => m,
        _ => Map::new(),
    };
    merged.extend(patch);
    let merged = Value::Object(merged);

    let doc = match section {
        Section::Site => validated::<SiteSettings>(section, merged)?,
        Section::Contact => validated::<ContactSettings>(section, merged)?,
        Section::Email => validated::<EmailSettings>(section, merged)?,
        Section::Notifications => validated::<NotificationSettings>(section, merged)?,
        Section::Security => validated::<SecuritySettings>(section, merged)?,
        Section::Integrations => validated::<IntegrationSettings>(section, merged)?,
    };
    setting::upsert(db, section.key(), doc).await?;
    info!(section = %section, "settings_updated");
    Ok(load(db).await?.view())
}
