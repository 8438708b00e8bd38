use parking_lot::RwLock;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub join_date: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            name: "User".into(),
            email: "user@example.com".into(),
            join_date: "2024-01-01".into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UsageStats {
    pub total_predictions: u64,
    pub favorite_app: String,
    pub last_used: String,
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub app_name: String,
    /// Seconds.
    pub processing_time: f64,
    pub result: String,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub name: String,
    pub email: String,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ProfileError {
    #[error("Name must not be empty.")]
    EmptyName,
    #[error("{0} is not a valid email address.")]
    InvalidEmail(String),
}

/// In-memory profile. Lost on restart; stats and history are placeholders.
#[derive(Debug, Default)]
pub struct ProfileStore {
    profile: RwLock<UserProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn profile(&self) -> UserProfile {
        self.profile.read().clone()
    }

    pub fn update(&self, form: ProfileForm) -> Result<UserProfile, ProfileError> {
        let name = form.name.trim();
        if name.is_empty() {
            return Err(ProfileError::EmptyName);
        }

        let email = form.email.trim();
        let valid_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid_email {
            return Err(ProfileError::InvalidEmail(email.to_string()));
        }

        let mut profile = self.profile.write();
        profile.name = name.to_string();
        profile.email = email.to_string();
        tracing::info!("Profile updated");

        Ok(profile.clone())
    }

    pub fn stats(&self) -> UsageStats {
        UsageStats {
            total_predictions: 42,
            favorite_app: "Image classifier".into(),
            last_used: "2024-07-28".into(),
        }
    }

    pub fn recent_predictions(&self) -> Vec<HistoryEntry> {
        vec![
            HistoryEntry {
                timestamp: "2024-07-28 14:30".into(),
                app_name: "Image classifier".into(),
                processing_time: 0.25,
                result: "cat (95%)".into(),
            },
            HistoryEntry {
                timestamp: "2024-07-28 13:45".into(),
                app_name: "Text sentiment".into(),
                processing_time: 0.12,
                result: "positive (87%)".into(),
            },
            HistoryEntry {
                timestamp: "2024-07-27 16:20".into(),
                app_name: "Image classifier".into(),
                processing_time: 0.31,
                result: "dog (92%)".into(),
            },
        ]
    }
}
