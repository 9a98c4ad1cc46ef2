#![allow(dead_code)]

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The signed-in student, as supplied by the client when a session starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn anonymous() -> Self {
        Self {
            id: Uuid::new_v4(),
            name: String::new(),
            email: None,
            location: None,
            skills: Vec::new(),
            interests: Vec::new(),
        }
    }
}
