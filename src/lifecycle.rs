//! Process lifecycle: listener up first, then the store, then serve until Ctrl-C.

use actix_cors::Cors;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use std::io;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{api, config::Config, database, database::StoreHandle, middleware};

/// Builds the HTTP server. Every route is mounted here, whether or not the
/// store is connected yet.
pub fn build_server(config: &Config, store: StoreHandle) -> io::Result<Server> {
    let store_data = web::Data::new(store);
    let openapi = api::swagger::ApiDoc::openapi();

    let server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(store_data.clone())
            .wrap(cors)
            .wrap(middleware::RequestMetrics)
            .wrap(Logger::default())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            .configure(api::configure)
    })
    // Ctrl-C is handled in `run` so the store can be closed first
    .disable_signals()
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}

pub async fn run(config: Config) -> io::Result<()> {
    let store = StoreHandle::new();
    let server = build_server(&config, store.clone())?;
    let handle = server.handle();
    let mut server_task = actix_rt::spawn(server);

    log::info!("🌐 Bhromonkari Server is running on {}:{}", config.host, config.port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", config.host, config.port);

    tokio::select! {
        connected = database::connect(&config) => match connected {
            Ok(db) => {
                store.install(db);
                log::info!("✅ Document store connected, serving requests");
            }
            Err(e) => {
                log::error!("❌ Failed to connect to document store: {}", e);
                handle.stop(false).await;
                let _ = server_task.await;
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("document store connection failed: {}", e),
                ));
            }
        },
        _ = tokio::signal::ctrl_c() => {
            log::info!("🛑 Interrupt received before the store connected, shutting down");
            handle.stop(true).await;
            let _ = server_task.await;
            return Ok(());
        }
    }

    tokio::select! {
        finished = &mut server_task => {
            // Server stopped on its own; still release the store
            store.close().await;
            return finished.map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal?;
            log::info!("🛑 Interrupt received, shutting down");
        }
    }

    handle.stop(true).await;
    store.close().await;
    let _ = server_task.await;

    log::info!("👋 Bhromonkari Server stopped");
    Ok(())
}
