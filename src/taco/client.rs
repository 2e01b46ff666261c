//! Typed client for TacoService.

use crate::rpc::{Client, Context, RpcError};
use crate::taco::types::{EatTacoRequest, EatTacoResponse};
use crate::taco::{EAT_TACO, SERVICE};

/// TacoService over an [`rpc::Client`](crate::rpc::Client).
#[derive(Debug, Clone)]
pub struct TacoServiceClient {
    client: Client,
}

impl TacoServiceClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Track a round of taco consumption.
    pub async fn eat_taco(&self, ctx: &Context, request: &EatTacoRequest) -> Result<EatTacoResponse, RpcError> {
        self.client.call(ctx, SERVICE, EAT_TACO, request).await
    }
}
