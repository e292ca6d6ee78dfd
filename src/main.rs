use anyhow::Context;
use std::sync::Arc;
use student_registry::{
    app,
    auth::{jwt::TokenService, password::PasswordService},
    cli::{output::Output, Cli},
    db::{open_store, StudentStore},
    AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    let output = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    init_tracing(&cli);
    output.banner();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            output.error(&format!("{:#}", e));
            return Err(e);
        }
    };
    cli.apply(&mut config);

    let password_service = PasswordService::new(config.auth.hash_cost)
        .context("invalid PASSWORD_HASH_* settings")?;
    let token_service = TokenService::new(&config.auth.jwt_secret);

    let store = connect(&config, &output).await?;

    let state = AppState {
        store,
        token_service: Arc::new(token_service),
        password_service: Arc::new(password_service),
    };

    let router = app(state);

    #[cfg(feature = "swagger-ui")]
    let router = {
        use student_registry::api::ApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        output.kv("docs", "/swagger-ui");
        router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    };

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    output.success(&format!("listening on http://{}", addr));
    tracing::info!(address = %addr, "server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    output.info("server stopped");
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.default_log_filter()));
    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect(config: &Config, output: &Output) -> anyhow::Result<Arc<dyn StudentStore>> {
    output.kv("database", &config.database.url);

    open_store(&config.database).await.or_else(|e| {
        output.error(&format!("database unavailable: {}", e));
        Err(e).context("REQUIRE_DATABASE is set and the database could not be opened")
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
