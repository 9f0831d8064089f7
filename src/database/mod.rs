mod memory;
mod store;

pub use memory::InMemoryStore;
pub use store::{DocumentStore, StoreHandle, UpdateOutcome};

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{ClientOptions, ServerApi, ServerApiVersion};
use mongodb::{Client, Collection, Database, IndexModel};
use std::error::Error;
use std::sync::Arc;

use crate::config::{Config, StoreBackend};
use crate::models::EMAIL_KEYED_COLLECTIONS;
use crate::utils::AppError;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = ClientOptions::parse(uri).await?;

        // Stable API v1
        let server_api = ServerApi::builder()
            .version(ServerApiVersion::V1)
            .strict(true)
            .deprecation_errors(true)
            .build();
        client_options.server_api = Some(server_api);

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };

        mongodb.ping().await?;
        log::info!("🏓 Pinged your deployment. You successfully connected to MongoDB!");

        mongodb.ensure_indexes().await;

        Ok(mongodb)
    }

    /// Email lookup indexes for the collections queried by `?email=`
    async fn ensure_indexes(&self) {
        log::info!("🔧 Creating database indexes...");

        for name in EMAIL_KEYED_COLLECTIONS {
            let index = IndexModel::builder().keys(doc! { "email": 1 }).build();

            match self.collection(name).create_index(index).await {
                Ok(_) => log::info!("   ✅ Index created: {}(email)", name),
                Err(e) => log::debug!("   ℹ️  Index not created on {}: {}", name, e),
            }
        }

        log::info!("✅ Database indexes ready");
    }

    pub fn collection(&self, name: &str) -> Collection<Document> {
        self.db.collection(name)
    }
}

#[async_trait]
impl DocumentStore for MongoDB {
    async fn find(&self, collection: &str, filter: Document) -> Result<Vec<Document>, AppError> {
        let cursor = self
            .collection(collection)
            .find(filter)
            .sort(doc! { "_id": 1 })
            .await?;
        let documents: Vec<Document> = cursor.try_collect().await?;
        Ok(documents)
    }

    async fn find_one(
        &self,
        collection: &str,
        filter: Document,
        projection: Option<Document>,
    ) -> Result<Option<Document>, AppError> {
        let coll = self.collection(collection);
        let mut action = coll.find_one(filter);
        if let Some(projection) = projection {
            action = action.projection(projection);
        }
        Ok(action.await?)
    }

    async fn insert_one(&self, collection: &str, document: Document) -> Result<Bson, AppError> {
        let result = self.collection(collection).insert_one(document).await?;
        Ok(result.inserted_id)
    }

    async fn update_one(
        &self,
        collection: &str,
        filter: Document,
        fields: Document,
    ) -> Result<UpdateOutcome, AppError> {
        let result = self
            .collection(collection)
            .update_one(filter, doc! { "$set": fields })
            .await?;
        Ok(UpdateOutcome {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
        })
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    async fn close(&self) {
        log::info!("🔌 Closing MongoDB connection");
        self.client.clone().shutdown().await;
    }
}

/// Connects the backend selected in `config` and checks it is alive.
pub async fn connect(config: &Config) -> Result<Arc<dyn DocumentStore>, Box<dyn Error>> {
    match config.backend {
        StoreBackend::MongoDB => {
            log::info!("📊 Database: {}", config.redacted_database_url());
            let db = MongoDB::new(&config.database_url, &config.database_name).await?;
            Ok(Arc::new(db))
        }
        StoreBackend::Memory => {
            log::warn!("⚠️  Using in-memory document store, data is lost on restart");
            let store = InMemoryStore::new();
            store.ping().await?;
            Ok(Arc::new(store))
        }
    }
}
