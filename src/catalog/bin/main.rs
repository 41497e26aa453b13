use axum::Router;
use bookshelf::catalog::controller::build_router;
use bookshelf::catalog::factory::create_catalog_service;
use bookshelf::core::controller::AppState;
use bookshelf::core::domain::{Configuration, ServerRuntime};
use bookshelf::utils::sqlite::setup_tracing;
use clap::Parser;
use lambda_http::{run, Error};
use tracing::info;

// See https://docs.aws.amazon.com/lambda/latest/dg/lambda-rust.html
// https://docs.aws.amazon.com/lambda/latest/dg/rust-http-events.html

#[tokio::main]
async fn main() -> Result<(), Error> {
    setup_tracing();

    let config = Configuration::parse();
    let catalog = create_catalog_service(&config).await?;
    let state = AppState::new(&config, catalog);
    info!(store = ?config.store, runtime = ?config.runtime, table = config.table_name.as_str(), "starting catalog");

    match config.runtime {
        ServerRuntime::Lambda => {
            run(build_router::<lambda_http::Body>(state)).await
        }
        ServerRuntime::Standalone => {
            let app: Router = build_router(state);
            info!(addr = %config.listen_addr, "listening");
            axum::Server::bind(&config.listen_addr)
                .serve(app.into_make_service())
                .await?;
            Ok(())
        }
    }
}
