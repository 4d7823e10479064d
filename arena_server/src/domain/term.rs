use serde::{Deserialize, Serialize};

// Card content as served by the admin catalog; timestamps are ignored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Term {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
}
