#[tokio::main]
async fn main() -> anyhow::Result<()> {
    kassa::run().await
}
