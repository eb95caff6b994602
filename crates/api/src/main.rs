use std::sync::Arc;

#[tokio::main]
async fn main() {
    colegio_observability::init();

    let config = colegio_api::config::AppConfig::from_env();
    let db = Arc::new(colegio_store::seed::seeded());
    let app = colegio_api::app::build_app(&config.jwt_secret, db);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .expect("failed to bind listen port");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
