use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use bkl_core::error::StoreError;
use bkl_core::model::{Gender, NewRegistration, RegistrationRecord, Status, StoredRegistration};
use bkl_core::regnum;
use bkl_core::store::RegistrationStore;

use entity::registration;

use crate::worker_wasm::util::{now_millis, uuid_v4};

/// `RegistrationStore` over the libSQL `registrations` table.
pub struct LibsqlStore<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LibsqlStore<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }
}

fn map_db_err(e: sea_orm::DbErr) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn gender_to_entity(g: Gender) -> registration::Gender {
    match g {
        Gender::Male => registration::Gender::Male,
        Gender::Female => registration::Gender::Female,
        Gender::Other => registration::Gender::Other,
    }
}

fn gender_to_core(g: registration::Gender) -> Gender {
    match g {
        registration::Gender::Male => Gender::Male,
        registration::Gender::Female => Gender::Female,
        registration::Gender::Other => Gender::Other,
    }
}

fn status_to_entity(s: Status) -> registration::Status {
    match s {
        Status::Registered => registration::Status::Registered,
        Status::Confirmed => registration::Status::Confirmed,
        Status::Cancelled => registration::Status::Cancelled,
    }
}

fn status_to_core(s: registration::Status) -> Status {
    match s {
        registration::Status::Registered => Status::Registered,
        registration::Status::Confirmed => Status::Confirmed,
        registration::Status::Cancelled => Status::Cancelled,
    }
}

fn record_to_core(m: registration::Model) -> RegistrationRecord {
    RegistrationRecord {
        id: m.id,
        name: m.name,
        age: m.age,
        gender: gender_to_core(m.gender),
        address: m.address,
        mobile: m.mobile,
        phone_verified: m.phone_verified,
        registration_number: m.registration_number,
        status: status_to_core(m.status),
        created_at: m.created_at,
    }
}

#[async_trait(?Send)]
impl RegistrationStore for LibsqlStore<'_> {
    async fn append(&self, record: NewRegistration) -> Result<StoredRegistration, StoreError> {
        // Creation time and identifier are assigned here, at write time, and
        // never rewritten. Colliding identifier windows are accepted as-is.
        let millis = now_millis();
        let stored = StoredRegistration {
            registration_number: regnum::registration_number(millis),
            storage_key: uuid_v4(),
        };

        let active = registration::ActiveModel {
            id: Set(stored.storage_key.clone()),
            name: Set(record.name),
            age: Set(record.age),
            gender: Set(gender_to_entity(record.gender)),
            address: Set(record.address),
            mobile: Set(record.mobile),
            phone_verified: Set(record.phone_verified),
            registration_number: Set(stored.registration_number.clone()),
            status: Set(registration::Status::default()),
            created_at: Set(Some(millis / 1_000)),
        };

        active.insert(self.db).await.map_err(map_db_err)?;
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<RegistrationRecord>, StoreError> {
        let rows = registration::Entity::find()
            .order_by_desc(registration::Column::CreatedAt)
            .all(self.db)
            .await
            .map_err(map_db_err)?;

        Ok(rows.into_iter().map(record_to_core).collect())
    }

    async fn update_status(&self, storage_key: &str, status: Status) -> Result<(), StoreError> {
        let found = registration::Entity::find_by_id(storage_key.to_string())
            .one(self.db)
            .await
            .map_err(map_db_err)?;

        let Some(row) = found else {
            return Err(StoreError::NotFound);
        };

        let mut active: registration::ActiveModel = row.into();
        active.status = Set(status_to_entity(status));
        active.update(self.db).await.map_err(map_db_err)?;
        Ok(())
    }

    async fn remove(&self, storage_key: &str) -> Result<(), StoreError> {
        let res = registration::Entity::delete_many()
            .filter(registration::Column::Id.eq(storage_key))
            .exec(self.db)
            .await
            .map_err(map_db_err)?;

        if res.rows_affected == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
