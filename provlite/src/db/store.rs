//! Domain stores over the shared database handle.

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, params};

use provlite_shared::errors::{ProvliteError, ProvliteResult};

use super::{Database, db_err};
use crate::model::{
    AccountId, DataBag, Instance, InstanceId, InstanceState, Nic, NicId, NicState, Volume, VolumeId,
};
use crate::object::{LabelWriter, NewNic, ObjectGraph};

/// Store for instances, nics and volumes.
#[derive(Clone)]
pub struct ObjectStore {
    db: Database,
}

impl ObjectStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a new instance in `Creating` state.
    pub fn create_instance(
        &self,
        account_id: AccountId,
        name: Option<&str>,
        data: DataBag,
    ) -> ProvliteResult<Instance> {
        let conn = self.db.conn();
        let now = Utc::now();
        let state = InstanceState::Creating;
        db_err!(conn.execute(
            "INSERT INTO instances (account_id, name, state, data, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                account_id,
                name,
                state.as_str(),
                encode_data(&data)?,
                now.to_rfc3339()
            ],
        ))?;
        let id = conn.last_insert_rowid();

        tracing::debug!(instance_id = id, account_id, "Created instance");

        Ok(Instance {
            id,
            account_id,
            name: name.map(str::to_string),
            state,
            created_at: now,
            data,
        })
    }

    pub fn load_instance(&self, id: InstanceId) -> ProvliteResult<Option<Instance>> {
        let conn = self.db.conn();
        let row = db_err!(
            conn.query_row(
                "SELECT id, account_id, name, state, data, created_at
                 FROM instances WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, Option<String>>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()
        )?;

        row.map(|(id, account_id, name, state, data, created_at)| {
            Ok(Instance {
                id,
                account_id,
                name,
                state: parse_instance_state(&state)?,
                created_at: parse_timestamp(&created_at)?,
                data: decode_data(&data)?,
            })
        })
        .transpose()
    }

    pub fn update_instance_state(
        &self,
        id: InstanceId,
        state: InstanceState,
    ) -> ProvliteResult<()> {
        let conn = self.db.conn();
        let updated = db_err!(conn.execute(
            "UPDATE instances SET state = ?1 WHERE id = ?2",
            params![state.as_str(), id],
        ))?;
        if updated == 0 {
            return Err(ProvliteError::NotFound(format!("instance {}", id)));
        }
        tracing::debug!(instance_id = id, state = state.as_str(), "Updated instance state");
        Ok(())
    }

    pub fn create_volume(&self, name: &str) -> ProvliteResult<Volume> {
        let conn = self.db.conn();
        let now = Utc::now();
        db_err!(conn.execute(
            "INSERT INTO volumes (name, created_at) VALUES (?1, ?2)",
            params![name, now.to_rfc3339()],
        ))?;
        Ok(Volume {
            id: conn.last_insert_rowid(),
            name: name.to_string(),
            created_at: now,
        })
    }

    pub fn load_volume(&self, id: VolumeId) -> ProvliteResult<Option<Volume>> {
        let conn = self.db.conn();
        let row = db_err!(
            conn.query_row(
                "SELECT id, name, created_at FROM volumes WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()
        )?;

        row.map(|(id, name, created_at)| {
            Ok(Volume {
                id,
                name,
                created_at: parse_timestamp(&created_at)?,
            })
        })
        .transpose()
    }

    /// Persist a new nic in `Requested` state.
    pub fn create_nic(&self, fields: NewNic) -> ProvliteResult<Nic> {
        let conn = self.db.conn();
        let now = Utc::now();
        let state = NicState::Requested;
        db_err!(conn.execute(
            "INSERT INTO nics (account_id, instance_id, network_id, device_number, state, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                fields.account_id,
                fields.instance_id,
                fields.network_id,
                fields.device_number,
                state.as_str(),
                now.to_rfc3339()
            ],
        ))?;
        let id = conn.last_insert_rowid();

        tracing::debug!(
            nic_id = id,
            instance_id = fields.instance_id,
            network_id = fields.network_id,
            device_number = fields.device_number,
            "Created nic"
        );

        Ok(Nic {
            id,
            account_id: fields.account_id,
            instance_id: fields.instance_id,
            network_id: fields.network_id,
            device_number: fields.device_number,
            state,
            created_at: now,
        })
    }

    /// Child nics of an instance, ordered by device number.
    pub fn instance_nics(&self, instance: InstanceId) -> ProvliteResult<Vec<Nic>> {
        let conn = self.db.conn();
        let mut stmt = db_err!(conn.prepare(
            "SELECT id, account_id, instance_id, network_id, device_number, state, created_at
             FROM nics WHERE instance_id = ?1 ORDER BY device_number, id",
        ))?;
        let rows = db_err!(
            stmt.query_map(params![instance], |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, i64>(3)?,
                    row.get::<_, u32>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })
        )?;

        let mut nics = Vec::new();
        for row in rows {
            let (id, account_id, instance_id, network_id, device_number, state, created_at) =
                db_err!(row)?;
            nics.push(Nic {
                id,
                account_id,
                instance_id,
                network_id,
                device_number,
                state: parse_nic_state(&state)?,
                created_at: parse_timestamp(&created_at)?,
            });
        }
        Ok(nics)
    }

    pub fn update_nic_state(&self, id: NicId, state: NicState) -> ProvliteResult<()> {
        let conn = self.db.conn();
        let updated = db_err!(conn.execute(
            "UPDATE nics SET state = ?1 WHERE id = ?2",
            params![state.as_str(), id],
        ))?;
        if updated == 0 {
            return Err(ProvliteError::NotFound(format!("nic {}", id)));
        }
        Ok(())
    }
}

impl ObjectGraph for ObjectStore {
    fn instance_nics(&self, instance: InstanceId) -> ProvliteResult<Vec<Nic>> {
        ObjectStore::instance_nics(self, instance)
    }

    fn create_nic(&self, fields: NewNic) -> ProvliteResult<Nic> {
        ObjectStore::create_nic(self, fields)
    }

    fn update_nic_state(&self, id: NicId, state: NicState) -> ProvliteResult<()> {
        ObjectStore::update_nic_state(self, id, state)
    }

    fn load_volume(&self, id: VolumeId) -> ProvliteResult<Option<Volume>> {
        ObjectStore::load_volume(self, id)
    }

    fn update_instance_state(&self, id: InstanceId, state: InstanceState) -> ProvliteResult<()> {
        ObjectStore::update_instance_state(self, id, state)
    }
}

/// Store for instance labels.
#[derive(Clone)]
pub struct LabelStore {
    db: Database,
}

impl LabelStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn create_instance_label(
        &self,
        account: AccountId,
        instance: InstanceId,
        key: &str,
        value: &str,
    ) -> ProvliteResult<()> {
        let conn = self.db.conn();
        db_err!(conn.execute(
            "INSERT INTO labels (account_id, instance_id, key, value, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![account, instance, key, value, Utc::now().to_rfc3339()],
        ))?;
        tracing::debug!(instance_id = instance, key, value, "Created instance label");
        Ok(())
    }

    /// Labels of an instance in creation order.
    pub fn instance_labels(&self, instance: InstanceId) -> ProvliteResult<Vec<(String, String)>> {
        let conn = self.db.conn();
        let mut stmt = db_err!(conn.prepare(
            "SELECT key, value FROM labels WHERE instance_id = ?1 ORDER BY id",
        ))?;
        let rows = db_err!(stmt.query_map(params![instance], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        }))?;

        let mut labels = Vec::new();
        for row in rows {
            labels.push(db_err!(row)?);
        }
        Ok(labels)
    }
}

impl LabelWriter for LabelStore {
    fn create_instance_label(
        &self,
        account: AccountId,
        instance: InstanceId,
        key: &str,
        value: &str,
    ) -> ProvliteResult<()> {
        LabelStore::create_instance_label(self, account, instance, key, value)
    }
}

fn encode_data(data: &DataBag) -> ProvliteResult<String> {
    serde_json::to_string(data)
        .map_err(|e| ProvliteError::Database(format!("failed to encode attribute data: {}", e)))
}

fn decode_data(raw: &str) -> ProvliteResult<DataBag> {
    serde_json::from_str(raw)
        .map_err(|e| ProvliteError::Database(format!("failed to decode attribute data: {}", e)))
}

fn parse_timestamp(raw: &str) -> ProvliteResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ProvliteError::Database(format!("bad timestamp '{}': {}", raw, e)))
}

fn parse_instance_state(raw: &str) -> ProvliteResult<InstanceState> {
    InstanceState::parse(raw)
        .ok_or_else(|| ProvliteError::Database(format!("unknown instance state '{}'", raw)))
}

fn parse_nic_state(raw: &str) -> ProvliteResult<NicState> {
    NicState::parse(raw)
        .ok_or_else(|| ProvliteError::Database(format!("unknown nic state '{}'", raw)))
}
