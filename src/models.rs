use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAnswersRequest {
    pub branch: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckDeployRequest {
    pub branches: Vec<String>,
}

/// Branch name to "deployed and serving".
pub type CheckDeployResponse = HashMap<String, bool>;
