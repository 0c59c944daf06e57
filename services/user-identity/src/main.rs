//! Xplor User Identity Service - 服务入口

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    xplor_bootstrap::run("config", user_identity::build_app).await
}
