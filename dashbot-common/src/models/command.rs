use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CommandInfo {
    pub fn slash(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: "slash".to_string(),
        }
    }
}
