use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDescriptor {
    #[serde(deserialize_with = "deserialize_app_id")]
    pub id: String,
    pub name: String,
    pub description: String,
}

// The backend keys apps by integer primary key; other deployments use strings.
fn deserialize_app_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Text(id) => Ok(id),
        RawId::Signed(id) => Ok(id.to_string()),
        RawId::Unsigned(id) => Ok(id.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_class: String,
    pub confidence: f64,
    /// Seconds spent by the backend.
    pub processing_time: f64,
    pub device: String,
    pub class_probabilities: BTreeMap<String, f64>,
}
