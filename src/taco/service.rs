//! Taco consumption tracking.

use async_trait::async_trait;
use thiserror::Error;

use crate::rpc::Context;
use crate::taco::server::TacoService;
use crate::taco::types::{EatTacoRequest, EatTacoResponse};

/// Validation failures for `EatTaco`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TacoError {
    #[error("Name is required")]
    NameRequired,
    #[error("Tacos is required")]
    TacosRequired,
}

/// Stateless TacoService: reports how many tacos were eaten.
#[derive(Debug, Clone, Copy, Default)]
pub struct TacoCounter;

#[async_trait]
impl TacoService for TacoCounter {
    async fn eat_taco(&self, _ctx: Context, request: EatTacoRequest) -> Result<EatTacoResponse, TacoError> {
        if request.name.is_empty() {
            return Err(TacoError::NameRequired);
        }
        if request.tacos.is_empty() {
            return Err(TacoError::TacosRequired);
        }
        Ok(EatTacoResponse {
            taco_consumption_status: format!("{} has consumed {} tacos", request.name, request.tacos.len()),
        })
    }
}
