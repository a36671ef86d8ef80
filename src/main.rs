#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let tracing_config = ghdisk::tracing::Config::from_env()?;
    let tracer = tracing_config.install()?;

    let config = ghdisk::Config::from_env()?;
    let app = config.build()?;
    let res = app.run().await;

    tracer.shutdown().await;

    res
}
