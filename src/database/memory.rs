use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Store, StoreError};
use crate::models::{Carrier, NewCarrier, NewPackager, NewShipment, Packager, Shipment};

/// In-process gateway enforcing the same NOT NULL / CHECK / FOREIGN KEY rules as the
/// PostgreSQL schema. Ids come from per-table sequences starting at 1.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

#[derive(Default)]
struct Tables {
    packagers: BTreeMap<i32, Packager>,
    carriers: BTreeMap<i32, Carrier>,
    shipments: BTreeMap<i32, Shipment>,
    packager_seq: i32,
    carrier_seq: i32,
    shipment_seq: i32,
}

impl Tables {
    fn check_shipment(
        &self,
        carrier_id: i32,
        packaged_by: i32,
        packages: i32,
        weight: f64,
    ) -> Result<(), StoreError> {
        if packages <= 0 {
            return Err(StoreError::Constraint(
                "new row for relation \"shipment\" violates check constraint on packages".to_string(),
            ));
        }
        // NaN fails this too
        if !(weight > 0.0) {
            return Err(StoreError::Constraint(
                "new row for relation \"shipment\" violates check constraint on weight".to_string(),
            ));
        }
        if !self.carriers.contains_key(&carrier_id) {
            return Err(StoreError::Constraint(format!(
                "Key (carrier_id)=({}) is not present in table \"carrier\"",
                carrier_id
            )));
        }
        if !self.packagers.contains_key(&packaged_by) {
            return Err(StoreError::Constraint(format!(
                "Key (packaged_by)=({}) is not present in table \"packager\"",
                packaged_by
            )));
        }
        Ok(())
    }
}

fn next(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_packagers(&self) -> Result<Vec<Packager>, StoreError> {
        Ok(self.tables.read().await.packagers.values().cloned().collect())
    }

    async fn find_packager(&self, id: i32) -> Result<Option<Packager>, StoreError> {
        Ok(self.tables.read().await.packagers.get(&id).cloned())
    }

    async fn insert_packager(&self, new: NewPackager) -> Result<Packager, StoreError> {
        let mut tables = self.tables.write().await;
        let packager = Packager {
            id: next(&mut tables.packager_seq),
            first_name: new.first_name,
            last_name: new.last_name,
            initials: new.initials,
            active: new.active,
        };
        tables.packagers.insert(packager.id, packager.clone());
        Ok(packager)
    }

    async fn update_packager(&self, packager: &Packager) -> Result<Packager, StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .packagers
            .get_mut(&packager.id)
            .ok_or_else(|| StoreError::NotFound(format!("packager {} not found", packager.id)))?;
        *row = packager.clone();
        Ok(packager.clone())
    }

    async fn list_carriers(&self) -> Result<Vec<Carrier>, StoreError> {
        Ok(self.tables.read().await.carriers.values().cloned().collect())
    }

    async fn find_carrier(&self, id: i32) -> Result<Option<Carrier>, StoreError> {
        Ok(self.tables.read().await.carriers.get(&id).cloned())
    }

    async fn insert_carrier(&self, new: NewCarrier) -> Result<Carrier, StoreError> {
        let mut tables = self.tables.write().await;
        let carrier = Carrier {
            id: next(&mut tables.carrier_seq),
            name: new.name,
            active: new.active,
        };
        tables.carriers.insert(carrier.id, carrier.clone());
        Ok(carrier)
    }

    async fn update_carrier(&self, carrier: &Carrier) -> Result<Carrier, StoreError> {
        let mut tables = self.tables.write().await;
        let row = tables
            .carriers
            .get_mut(&carrier.id)
            .ok_or_else(|| StoreError::NotFound(format!("carrier {} not found", carrier.id)))?;
        *row = carrier.clone();
        Ok(carrier.clone())
    }

    async fn list_shipments(&self) -> Result<Vec<Shipment>, StoreError> {
        Ok(self.tables.read().await.shipments.values().cloned().collect())
    }

    async fn find_shipment(&self, id: i32) -> Result<Option<Shipment>, StoreError> {
        Ok(self.tables.read().await.shipments.get(&id).cloned())
    }

    async fn insert_shipment(&self, new: NewShipment) -> Result<Shipment, StoreError> {
        let mut tables = self.tables.write().await;
        tables.check_shipment(new.carrier_id, new.packaged_by, new.packages, new.weight)?;

        let shipment = Shipment {
            id: next(&mut tables.shipment_seq),
            reference: new.reference,
            carrier_id: new.carrier_id,
            packages: new.packages,
            weight: new.weight,
            tracking: new.tracking,
            packaged_by: new.packaged_by,
            create_date: new.create_date.unwrap_or_else(|| Utc::now().naive_utc()),
        };
        tables.shipments.insert(shipment.id, shipment.clone());
        Ok(shipment)
    }

    async fn update_shipment(&self, shipment: &Shipment) -> Result<Shipment, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.shipments.contains_key(&shipment.id) {
            return Err(StoreError::NotFound(format!("shipment {} not found", shipment.id)));
        }
        tables.check_shipment(
            shipment.carrier_id,
            shipment.packaged_by,
            shipment.packages,
            shipment.weight,
        )?;
        tables.shipments.insert(shipment.id, shipment.clone());
        Ok(shipment.clone())
    }

    async fn delete_shipment(&self, id: i32) -> Result<Shipment, StoreError> {
        self.tables
            .write()
            .await
            .shipments
            .remove(&id)
            .ok_or_else(|| StoreError::NotFound(format!("shipment {} not found", id)))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
