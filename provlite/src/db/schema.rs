//! SQL schema for the provisioning store.

pub const SCHEMA_VERSION: i32 = 1;

const SCHEMA_VERSION_TABLE: &str = "
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);
";

const INSTANCES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS instances (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL,
    name TEXT,
    state TEXT NOT NULL,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

const NICS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS nics (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL,
    instance_id INTEGER NOT NULL REFERENCES instances(id),
    network_id INTEGER NOT NULL,
    device_number INTEGER NOT NULL,
    state TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_nics_instance ON nics(instance_id);
";

const VOLUMES_TABLE: &str = "
CREATE TABLE IF NOT EXISTS volumes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    created_at TEXT NOT NULL
);
";

const LABELS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS labels (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    account_id INTEGER NOT NULL,
    instance_id INTEGER NOT NULL REFERENCES instances(id),
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_labels_instance ON labels(instance_id);
";

pub fn all_schemas() -> &'static [&'static str] {
    &[
        SCHEMA_VERSION_TABLE,
        INSTANCES_TABLE,
        NICS_TABLE,
        VOLUMES_TABLE,
        LABELS_TABLE,
    ]
}
