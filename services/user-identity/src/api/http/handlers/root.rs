use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub status: &'static str,
    pub message: &'static str,
}

pub async fn status() -> Json<ServerStatus> {
    Json(ServerStatus {
        status: "ok",
        message: "Server is up",
    })
}
