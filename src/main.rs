use crate::router::init_router;
use crate::state::init_app_state;
use dotenvy::dotenv;
use maktab_config::ServerConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub(crate) mod docs;
pub(crate) mod logging;
pub(crate) mod modules;
pub(crate) mod router;
pub(crate) mod state;
pub(crate) mod sweep;
pub(crate) mod utils;
pub mod validator;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                // axum logs rejections from built-in extractors with the `axum::rejection`
                // target, at `TRACE` level. `axum::rejection=trace` enables showing those events
                format!(
                    "{}=debug,tower_http=debug,axum::rejection=trace",
                    env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let state = init_app_state().await;
    sweep::spawn_retention_sweep(&state);
    let app = init_router(state);

    let config = ServerConfig::from_env();
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await.unwrap();
    println!("🚀 Server running on http://localhost:{}", config.port);
    println!(
        "📚 Swagger UI available at http://localhost:{}/swagger-ui",
        config.port
    );
    println!(
        "📖 Scalar UI available at http://localhost:{}/scalar",
        config.port
    );
    axum::serve(listener, app).await.unwrap();
}
