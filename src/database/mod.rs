pub mod manager;
pub mod memory;
pub mod postgres;
pub mod schema;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Carrier, NewCarrier, NewPackager, NewShipment, Packager, Shipment};

pub use manager::{open_store, DatabaseError};
pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// NOT NULL, CHECK or FOREIGN KEY rejection
    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error(transparent)]
    Backend(#[from] sqlx::Error),
}

/// Persistence gateway. Every call is a single statement; the backend provides atomicity.
#[async_trait]
pub trait Store: Send + Sync {
    async fn list_packagers(&self) -> Result<Vec<Packager>, StoreError>;
    async fn find_packager(&self, id: i32) -> Result<Option<Packager>, StoreError>;
    async fn insert_packager(&self, new: NewPackager) -> Result<Packager, StoreError>;
    async fn update_packager(&self, packager: &Packager) -> Result<Packager, StoreError>;

    async fn list_carriers(&self) -> Result<Vec<Carrier>, StoreError>;
    async fn find_carrier(&self, id: i32) -> Result<Option<Carrier>, StoreError>;
    async fn insert_carrier(&self, new: NewCarrier) -> Result<Carrier, StoreError>;
    async fn update_carrier(&self, carrier: &Carrier) -> Result<Carrier, StoreError>;

    async fn list_shipments(&self) -> Result<Vec<Shipment>, StoreError>;
    async fn find_shipment(&self, id: i32) -> Result<Option<Shipment>, StoreError>;
    async fn insert_shipment(&self, new: NewShipment) -> Result<Shipment, StoreError>;
    async fn update_shipment(&self, shipment: &Shipment) -> Result<Shipment, StoreError>;
    /// Returns the row as it was before removal
    async fn delete_shipment(&self, id: i32) -> Result<Shipment, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
