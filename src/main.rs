use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    scribebridge::cli::app::run().await
}
