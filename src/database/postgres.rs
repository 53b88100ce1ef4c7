use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::{schema, Store, StoreError};
use crate::models::{Carrier, NewCarrier, NewPackager, NewShipment, Packager, Shipment};

const PACKAGER_COLUMNS: &str = "id, first_name, last_name, initials, active";
const CARRIER_COLUMNS: &str = "id, name, active";
const SHIPMENT_COLUMNS: &str =
    "id, reference, carrier_id, packages, weight, tracking, packaged_by, create_date";

/// PostgreSQL gateway over a shared connection pool
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn bootstrap_schema(&self) -> Result<(), StoreError> {
        for statement in schema::STATEMENTS {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Shipping tables ready");
        Ok(())
    }
}

/// Integrity (23xxx) and data (22xxx) SQLSTATEs are rejections of the row, not outages
fn classify(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound("Record not found".to_string()),
        sqlx::Error::Database(db) => {
            let code = db.code().map(|c| c.into_owned()).unwrap_or_default();
            if code.starts_with("23") || code.starts_with("22") {
                StoreError::Constraint(db.message().to_string())
            } else {
                StoreError::Backend(sqlx::Error::Database(db))
            }
        }
        other => StoreError::Backend(other),
    }
}

fn missing(table: &str, id: i32) -> StoreError {
    StoreError::NotFound(format!("{} {} not found", table, id))
}

#[async_trait]
impl Store for PgStore {
    async fn list_packagers(&self) -> Result<Vec<Packager>, StoreError> {
        let sql = format!("SELECT {} FROM packager ORDER BY id", PACKAGER_COLUMNS);
        sqlx::query_as::<_, Packager>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_packager(&self, id: i32) -> Result<Option<Packager>, StoreError> {
        let sql = format!("SELECT {} FROM packager WHERE id = $1", PACKAGER_COLUMNS);
        sqlx::query_as::<_, Packager>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn insert_packager(&self, new: NewPackager) -> Result<Packager, StoreError> {
        let sql = format!(
            "INSERT INTO packager (first_name, last_name, initials, active) VALUES ($1, $2, $3, $4) RETURNING {}",
            PACKAGER_COLUMNS
        );
        sqlx::query_as::<_, Packager>(&sql)
            .bind(new.first_name)
            .bind(new.last_name)
            .bind(new.initials)
            .bind(new.active)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update_packager(&self, packager: &Packager) -> Result<Packager, StoreError> {
        let sql = format!(
            "UPDATE packager SET first_name = $2, last_name = $3, initials = $4, active = $5 WHERE id = $1 RETURNING {}",
            PACKAGER_COLUMNS
        );
        sqlx::query_as::<_, Packager>(&sql)
            .bind(packager.id)
            .bind(&packager.first_name)
            .bind(&packager.last_name)
            .bind(&packager.initials)
            .bind(packager.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| missing("packager", packager.id))
    }

    async fn list_carriers(&self) -> Result<Vec<Carrier>, StoreError> {
        let sql = format!("SELECT {} FROM carrier ORDER BY id", CARRIER_COLUMNS);
        sqlx::query_as::<_, Carrier>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_carrier(&self, id: i32) -> Result<Option<Carrier>, StoreError> {
        let sql = format!("SELECT {} FROM carrier WHERE id = $1", CARRIER_COLUMNS);
        sqlx::query_as::<_, Carrier>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn insert_carrier(&self, new: NewCarrier) -> Result<Carrier, StoreError> {
        let sql = format!(
            "INSERT INTO carrier (name, active) VALUES ($1, $2) RETURNING {}",
            CARRIER_COLUMNS
        );
        sqlx::query_as::<_, Carrier>(&sql)
            .bind(new.name)
            .bind(new.active)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update_carrier(&self, carrier: &Carrier) -> Result<Carrier, StoreError> {
        let sql = format!(
            "UPDATE carrier SET name = $2, active = $3 WHERE id = $1 RETURNING {}",
            CARRIER_COLUMNS
        );
        sqlx::query_as::<_, Carrier>(&sql)
            .bind(carrier.id)
            .bind(&carrier.name)
            .bind(carrier.active)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| missing("carrier", carrier.id))
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>, StoreError> {
        let sql = format!("SELECT {} FROM shipment ORDER BY id", SHIPMENT_COLUMNS);
        sqlx::query_as::<_, Shipment>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(classify)
    }

    async fn find_shipment(&self, id: i32) -> Result<Option<Shipment>, StoreError> {
        let sql = format!("SELECT {} FROM shipment WHERE id = $1", SHIPMENT_COLUMNS);
        sqlx::query_as::<_, Shipment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)
    }

    async fn insert_shipment(&self, new: NewShipment) -> Result<Shipment, StoreError> {
        let sql = format!(
            r#"INSERT INTO shipment (reference, carrier_id, packages, weight, tracking, packaged_by, create_date)
            VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, timezone('utc', now())))
            RETURNING {}"#,
            SHIPMENT_COLUMNS
        );
        sqlx::query_as::<_, Shipment>(&sql)
            .bind(new.reference)
            .bind(new.carrier_id)
            .bind(new.packages)
            .bind(new.weight)
            .bind(new.tracking)
            .bind(new.packaged_by)
            .bind(new.create_date)
            .fetch_one(&self.pool)
            .await
            .map_err(classify)
    }

    async fn update_shipment(&self, shipment: &Shipment) -> Result<Shipment, StoreError> {
        let sql = format!(
            r#"UPDATE shipment
            SET reference = $2, carrier_id = $3, packages = $4, weight = $5, tracking = $6, packaged_by = $7
            WHERE id = $1
            RETURNING {}"#,
            SHIPMENT_COLUMNS
        );
        sqlx::query_as::<_, Shipment>(&sql)
            .bind(shipment.id)
            .bind(shipment.reference)
            .bind(shipment.carrier_id)
            .bind(shipment.packages)
            .bind(shipment.weight)
            .bind(&shipment.tracking)
            .bind(shipment.packaged_by)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| missing("shipment", shipment.id))
    }

    async fn delete_shipment(&self, id: i32) -> Result<Shipment, StoreError> {
        let sql = format!("DELETE FROM shipment WHERE id = $1 RETURNING {}", SHIPMENT_COLUMNS);
        sqlx::query_as::<_, Shipment>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(classify)?
            .ok_or_else(|| missing("shipment", id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
