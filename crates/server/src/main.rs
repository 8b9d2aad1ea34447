#[tokio::main]
async fn main() -> anyhow::Result<()> {
    repostly_server::start().await
}
