#[tokio::main]
async fn main() -> anyhow::Result<()> {
    signal_relay::run().await
}
