use auto_stop_cleanup::{handle_cleanup, CleanupClients, CleanupEvent, Settings};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    let settings = Settings::from_env()?;
    tracing::info!(?settings, "loaded settings");

    let clients = CleanupClients::from_settings(&settings).await?;

    run(service_fn(|event: LambdaEvent<CleanupEvent>| {
        handle_cleanup(&clients, &settings, event)
    }))
    .await
}
