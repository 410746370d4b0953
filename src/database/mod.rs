use mongodb::{Client, Collection, Database};
use std::error::Error;

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        // Timeouts
        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Database name from the URI path, else env, else default
        let db_name = client_options.default_database.clone().unwrap_or_else(|| {
            std::env::var("MONGODB_DATABASE").unwrap_or_else(|_| "campAid".to_string())
        });

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { client, db };

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Creates indexes on the hot lookup keys. These are plain (non-unique)
    /// indexes: email uniqueness is checked at the application layer before
    /// insert, not enforced by the database.
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self
            .database()
            .collection::<mongodb::bson::Document>("users");

        let users_email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match users.create_index(users_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // participant(camp_id) - the payment flow filters on this key
        let participants = self
            .database()
            .collection::<mongodb::bson::Document>("participant");

        let participant_camp_index = IndexModel::builder().keys(doc! { "camp_id": 1 }).build();

        match participants.create_index(participant_camp_index).await {
            Ok(_) => log::info!("   ✅ Index created: participant(camp_id)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        // payments(email) - per-user payment history
        let payments = self
            .database()
            .collection::<mongodb::bson::Document>("payments");

        let payments_email_index = IndexModel::builder().keys(doc! { "email": 1 }).build();

        match payments.create_index(payments_email_index).await {
            Ok(_) => log::info!("   ✅ Index created: payments(email)"),
            Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Check if the connection is healthy
    pub async fn health_check(&self) -> bool {
        self.db.list_collection_names().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_mongodb_connection() {
        dotenv::dotenv().ok();

        let uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri).await;
        assert!(db.is_ok());
        assert!(db.unwrap().health_check().await);
    }
}
