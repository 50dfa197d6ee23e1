use std::sync::Arc;

use aws_lambda_events::cloudwatch_events::CloudWatchEvent;
use emblue_core::config::TriggerConfig;
use emblue_core::crypto::TokenCipher;
use emblue_db::TenantResolver;
use emblue_pipeline::StepFunctionsTrigger;
use emblue_worker::{handle, WorkerContext};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "emblue_worker=info,emblue_pipeline=info,emblue_db=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = TriggerConfig::from_env()?;
    tracing::info!(?config, "Configuration loaded");

    let cipher = TokenCipher::new(&config.fernet_key)?;
    let trigger = StepFunctionsTrigger::from_config(&config).await;
    let resolver = TenantResolver::new(&config, cipher);

    let ctx = Arc::new(WorkerContext {
        config,
        resolver,
        trigger,
    });

    if std::env::var_os("AWS_LAMBDA_RUNTIME_API").is_none() {
        tracing::info!("No Lambda runtime API, performing a single local run");
        let response = handle(ctx.as_ref(), serde_json::Value::Null, today()).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    run(service_fn(move |event: LambdaEvent<CloudWatchEvent>| {
        let ctx = Arc::clone(&ctx);
        async move {
            let input = serde_json::to_value(&event.payload)?;
            Ok::<_, Error>(handle(ctx.as_ref(), input, today()).await)
        }
    }))
    .await
}

fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}
