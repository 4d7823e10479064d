use serde::{Deserialize, Serialize};

// Card content shown on the game board. Serialized exactly as stored in terms.json.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Term {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

// Admin form input before id assignment and timestamping.
#[derive(Clone, Debug, Default)]
pub struct TermInput {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

// Host session issued after a successful PIN check.
#[derive(Clone, Debug)]
pub struct HostSession {
    pub session_id: String,
    pub expires_at: u64,
}

// Result of persisting an uploaded image.
#[derive(Clone, Debug)]
pub struct StoredImage {
    pub file_name: String,
    pub public_path: String,
}
