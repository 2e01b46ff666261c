//! Request and response payloads for TacoService.

use serde::{Deserialize, Serialize};

/// Request for `TacoService.EatTaco`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EatTacoRequest {
    /// Who is eating.
    pub name: String,
    /// Every taco consumed.
    pub tacos: Vec<String>,
}

/// Response for `TacoService.EatTaco`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EatTacoResponse {
    /// Current consumption status.
    pub taco_consumption_status: String,
}
