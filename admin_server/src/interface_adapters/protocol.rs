use serde::{Deserialize, Serialize};

use crate::domain::Term;

// Admin form payload. Fields are optional so missing values surface as
// validation messages instead of extractor rejections.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTermRequest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

// Outcome envelope for dashboard mutations.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<Term>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HostLoginRequest {
    pub pin: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostLoginResponse {
    pub token: String,
    pub expires_at: u64,
}

#[derive(Debug, Deserialize)]
pub struct HostTokenRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostVerifyResponse {
    pub session_id: String,
    pub expires_at: u64,
}

#[derive(Debug, Serialize)]
pub struct HostLogoutResponse {
    pub revoked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub success: bool,
    pub file_name: String,
    pub path: String,
}

// Error envelope shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub message: String,
}
