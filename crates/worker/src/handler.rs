//! One scheduled invocation: resolve the tenant, then dispatch the range.

use emblue_core::config::TriggerConfig;
use emblue_core::dates::DateRange;
use emblue_core::types::Date;
use emblue_db::TenantResolver;
use emblue_pipeline::{DispatchError, DispatchReport, Dispatcher, RegistryStore, WorkflowTrigger};

use crate::response::TriggerResponse;

/// Long-lived state built once per process and shared by every invocation.
pub struct WorkerContext<T> {
    pub config: TriggerConfig,
    pub resolver: TenantResolver,
    pub trigger: T,
}

/// Handle one invocation for the range ending on `today`.
///
/// `input` is the scheduler payload, echoed back in the response body.
/// Failures are logged and turned into a 500 response; they are never
/// reported as success.
pub async fn handle<T: WorkflowTrigger>(
    ctx: &WorkerContext<T>,
    input: serde_json::Value,
    today: Date,
) -> TriggerResponse {
    let range = DateRange::ending_on(today, ctx.config.lookback_days);

    match run(ctx, range).await {
        Ok(report) => TriggerResponse::ok(&input, &report),
        Err(e) => {
            tracing::error!(error = %e, "Trigger run failed");
            TriggerResponse::failed(&input, &e)
        }
    }
}

async fn run<T: WorkflowTrigger>(
    ctx: &WorkerContext<T>,
    range: DateRange,
) -> Result<DispatchReport, DispatchError> {
    let resolved = ctx.resolver.resolve(&ctx.config.client_key).await?;
    let store = RegistryStore::new(ctx.resolver.registry_target().clone(), &resolved.profile);

    Dispatcher::new(&store, &ctx.trigger).run(range).await
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
