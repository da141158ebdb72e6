#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    famrelay_cli::cli::app::run().await
}
