use serde::{Deserialize, Serialize};

/// Public view of one running secondary bot. The token never leaves the manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotInstanceInfo {
    pub id: String,
    pub name: String,
    pub prefix: String,
}
