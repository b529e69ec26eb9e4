#[tokio::main]
async fn main() -> anyhow::Result<()> {
    betukereso_backend::run().await
}
