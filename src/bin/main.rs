#[cfg(not(target_arch = "wasm32"))]
mod native {
    use actix_web::web;
    use parks::config;
    use parks::core::db::{seed_parks, MemoryStore};
    use tracing_subscriber::EnvFilter;

    fn setup_tracing() {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
            )
            .init();
    }

    pub async fn run() -> std::io::Result<()> {
        setup_tracing();

        // One store for the whole process, dropped when the server stops
        let store = web::Data::new(MemoryStore::new());
        if config::seed_on_start() {
            if let Err(e) = seed_parks(store.get_ref()) {
                tracing::warn!(error = %e, "could not seed sample parks");
            }
        }

        parks::server::run(store, &config::bind_addr()).await?;
        tracing::info!("server stopped");
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    native::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {}
