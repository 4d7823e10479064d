#[tokio::main]
async fn main() -> std::io::Result<()> {
    admin_server::run_with_config().await
}
