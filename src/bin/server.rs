use std::{
    net::{IpAddr, SocketAddr},
    process::ExitCode,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use extratify::{
    AppConfig, AppState, FormLayout, TableColumns, build_router, graceful_shutdown,
    logging_middleware,
};

/// The web server for the Extratify transaction page.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The IP address to listen on.
    #[arg(long, env = "EXTRATIFY_ADDRESS", default_value = "127.0.0.1")]
    address: IpAddr,

    /// The port to serve the page from.
    #[arg(short, long, env = "EXTRATIFY_PORT", default_value_t = 3000)]
    port: u16,

    /// The canonical name of the local timezone, e.g. "America/Sao_Paulo".
    ///
    /// Used to fill in today's date on the transaction form.
    #[arg(long, env = "EXTRATIFY_TIMEZONE", default_value = "Etc/UTC")]
    timezone: String,

    /// Comma separated list of the columns shown in the transaction table.
    #[arg(
        long,
        env = "EXTRATIFY_COLUMNS",
        default_value = "date,description,category,account,value"
    )]
    columns: TableColumns,

    /// Where the transaction form is placed: "inline" above the table or in a "dialog".
    #[arg(long, env = "EXTRATIFY_FORM_LAYOUT", default_value = "inline")]
    form_layout: FormLayout,
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_logging();

    let args = Args::parse();
    let address = SocketAddr::new(args.address, args.port);

    let config = match AppConfig::new(address, &args.timezone, args.columns, args.form_layout) {
        Ok(config) => config,
        Err(error) => {
            tracing::error!("Invalid configuration: {error}");
            return ExitCode::FAILURE;
        }
    };

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = build_router(AppState::new(&config)).layer(middleware::from_fn(logging_middleware));
    let router = add_tracing_layer(router);

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", config.address);
    if let Err(error) = axum_server::bind(config.address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // Errors are logged where they occur, so 5xx responses are not logged again here.
        .on_failure(());

    router.layer(tracing_layer)
}
