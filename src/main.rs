use muchshop_server_lib::api::server;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt().init();

    server::start().await;
}
