//! Mini-app page served to the chat client's web view

use axum::{Router, response::Html, routing::get};

use crate::core::ServerState;

const PAGE: &str = include_str!("../../../assets/miniapp.html");

pub fn router() -> Router<ServerState> {
    Router::new().route("/miniapp", get(page))
}

async fn page() -> Html<&'static str> {
    Html(PAGE)
}
