use std::sync::Arc;

use sqlx::PgPool;

use platformd_core::NewPlatform;
use platformd_infra::{
    CommandClient, HttpCommandClient, InMemoryPlatformStore, PlatformStore, PostgresPlatformStore,
};

/// Dependencies shared by every request handler.
///
/// Both members are safe for concurrent use; handlers hold no other state.
pub struct AppServices {
    pub store: Arc<dyn PlatformStore>,
    pub command_client: Arc<dyn CommandClient>,
}

impl AppServices {
    pub fn new(store: Arc<dyn PlatformStore>, command_client: Arc<dyn CommandClient>) -> Self {
        Self {
            store,
            command_client,
        }
    }
}

/// Wire up the store and notifier from the environment.
///
/// `DATABASE_URL` set selects the Postgres store; otherwise an in-memory
/// store is used and seeded with sample records. Configuration is read once
/// here and never reloaded.
pub async fn build_services() -> AppServices {
    let command_service_url = std::env::var("COMMAND_SERVICE_URL").unwrap_or_else(|_| {
        tracing::warn!("COMMAND_SERVICE_URL not set; using dev default");
        "http://localhost:6000/api/c/platforms".to_string()
    });
    tracing::info!("command service endpoint: {command_service_url}");
    let command_client = Arc::new(HttpCommandClient::new(command_service_url));

    let store: Arc<dyn PlatformStore> = match std::env::var("DATABASE_URL") {
        Ok(database_url) => {
            tracing::info!("using postgres platform store");
            let pool = PgPool::connect(&database_url)
                .await
                .expect("failed to connect to Postgres");
            let store = PostgresPlatformStore::new(pool);
            store
                .ensure_schema()
                .await
                .expect("failed to prepare platforms schema");
            Arc::new(store)
        }
        Err(_) => {
            tracing::info!("using in-memory platform store, seeding sample data");
            let store = InMemoryPlatformStore::new();
            store.seed(sample_platforms());
            Arc::new(store)
        }
    };

    AppServices::new(store, command_client)
}

fn sample_platforms() -> Vec<NewPlatform> {
    vec![
        NewPlatform {
            name: "Dot Net".to_string(),
            publisher: "Microsoft".to_string(),
            cost: "Free".to_string(),
        },
        NewPlatform {
            name: "SQL Server Express".to_string(),
            publisher: "Microsoft".to_string(),
            cost: "Free".to_string(),
        },
        NewPlatform {
            name: "Kubernetes".to_string(),
            publisher: "Cloud Native Computing Foundation".to_string(),
            cost: "Free".to_string(),
        },
    ]
}
