//! Server bindings for TacoService.

use std::sync::Arc;

use async_trait::async_trait;

use crate::rpc::{handle, Context, DispatchTable, RpcError, RpcRequest};
use crate::taco::service::TacoError;
use crate::taco::types::{EatTacoRequest, EatTacoResponse};
use crate::taco::{EAT_TACO, SERVICE};

/// Business capability behind `TacoService`.
#[async_trait]
pub trait TacoService: Send + Sync + 'static {
    /// Track a round of taco consumption.
    async fn eat_taco(&self, ctx: Context, request: EatTacoRequest) -> Result<EatTacoResponse, TacoError>;
}

/// Register every TacoService method on `table`.
pub fn register_taco_service<S: TacoService>(table: &mut DispatchTable, service: Arc<S>) -> Result<(), RpcError> {
    table.register(SERVICE, EAT_TACO, move |ctx: Context, request: RpcRequest| {
        let service = service.clone();
        async move {
            handle(ctx, request, |ctx, req: EatTacoRequest| async move {
                service.eat_taco(ctx, req).await
            })
            .await
        }
    })
}
