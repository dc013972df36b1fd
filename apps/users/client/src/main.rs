use core_config::tracing::install_color_eyre;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    users_client::run().await
}
