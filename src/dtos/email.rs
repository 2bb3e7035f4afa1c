use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct EmailContent {
    pub message: String,
    pub subject: String,
}

#[derive(Debug, Serialize)]
pub struct EmailSentResponse {
    pub status: &'static str,
    pub message: &'static str,
}
