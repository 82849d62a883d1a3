//! Durable SQLite store.
//!
//! Schema is created explicitly at open time, never lazily on first use.
//! One connection behind a mutex; each statement commits on its own, which
//! gives per-request durability without exposing a transaction boundary.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::debug;

use stockbook_catalog::{Location, Product};
use stockbook_core::{DomainError, Entity, LocationId, MovementId, ProductId};
use stockbook_ledger::Movement;

use crate::store::{InventoryStore, StoreError, StoreResult};

/// SQLite-backed [`InventoryStore`].
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database file and initialize the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path).map_err(db_err)?;
        Self::with_connection(conn)
    }

    /// Fresh private in-memory database (tests/dev).
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory().map_err(db_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> StoreResult<Self> {
        init_schema(&conn)?;
        debug!("sqlite schema ready");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::storage("connection lock poisoned"))
    }
}

fn init_schema(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            product_id  TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT
        );
        CREATE TABLE IF NOT EXISTS locations (
            location_id TEXT PRIMARY KEY,
            name        TEXT NOT NULL,
            description TEXT
        );
        CREATE TABLE IF NOT EXISTS movements (
            seq           INTEGER PRIMARY KEY AUTOINCREMENT,
            movement_id   TEXT NOT NULL UNIQUE,
            timestamp     TEXT NOT NULL,
            product_id    TEXT NOT NULL,
            from_location TEXT,
            to_location   TEXT,
            qty           INTEGER NOT NULL
        );",
    )
    .map_err(db_err)
}

fn db_err(e: rusqlite::Error) -> StoreError {
    StoreError::storage(e.to_string())
}

fn parse_timestamp(raw: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::storage(format!("bad stored timestamp {raw:?}: {e}")))
}

type EntityRow = (String, String, Option<String>);
type MovementRow = (String, String, String, Option<String>, Option<String>, i64);

fn product_from_row((id, name, description): EntityRow) -> StoreResult<Product> {
    Product::new(Some(ProductId::new(id)), name, description).map_err(StoreError::from)
}

fn location_from_row((id, name, description): EntityRow) -> StoreResult<Location> {
    Location::new(Some(LocationId::new(id)), name, description).map_err(StoreError::from)
}

fn movement_from_row(
    (id, timestamp, product_id, from, to, qty): MovementRow,
) -> StoreResult<Movement> {
    Movement::from_parts(
        MovementId::new(id),
        parse_timestamp(&timestamp)?,
        ProductId::new(product_id),
        from.map(LocationId::new),
        to.map(LocationId::new),
        qty,
    )
    .map_err(StoreError::from)
}

impl InventoryStore for SqliteStore {
    fn create_product(&self, product: Product) -> StoreResult<Product> {
        let conn = self.conn()?;
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM products WHERE product_id = ?1",
                params![product.id().as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;
        if exists.is_some() {
            return Err(DomainError::conflict(format!("product id {} already exists", product.id())).into());
        }
        conn.execute(
            "INSERT INTO products (product_id, name, description) VALUES (?1, ?2, ?3)",
            params![product.id().as_str(), product.name(), product.description()],
        )
        .map_err(db_err)?;
        Ok(product)
    }

    fn update_product(
        &self,
        id: &ProductId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Product> {
        let mut product = self.get_product(id)?;
        product.rename(name, description.map(str::to_string))?;
        let conn = self.conn()?;
        conn.execute(
            "UPDATE products SET name = ?2, description = ?3 WHERE product_id = ?1",
            params![id.as_str(), product.name(), product.description()],
        )
        .map_err(db_err)?;
        Ok(product)
    }

    fn get_product(&self, id: &ProductId) -> StoreResult<Product> {
        let conn = self.conn()?;
        let row: Option<EntityRow> = conn
            .query_row(
                "SELECT product_id, name, description FROM products WHERE product_id = ?1",
                params![id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(db_err)?;
        match row {
            Some(row) => product_from_row(row),
            None => Err(DomainError::NotFound.into()),
        }
    }

    fn list_products(&self) -> StoreResult<Vec<Product>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT product_id, name, description FROM products ORDER BY name ASC, product_id ASC")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(db_err)?
            .collect::<Result<Vec<EntityRow>, _>>()
            .map_err(db_err)?;
        rows.into_iter().map(product_from_row).collect()
    }

    fn create_location(&self, location: Location) -> StoreResult<Location> {
        let conn = self.conn()?;
        let exists: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM locations WHERE location_id = ?1",
                params![location.id().as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(db_err)?;
        if exists.is_some() {
            return Err(DomainError::conflict(format!("location id {} already exists", location.id())).into());
        }
        conn.execute(
            "INSERT INTO locations (location_id, name, description) VALUES (?1, ?2, ?3)",
            params![location.id().as_str(), location.name(), location.description()],
        )
        .map_err(db_err)?;
        Ok(location)
    }

    fn update_location(
        &self,
        id: &LocationId,
        name: &str,
        description: Option<&str>,
    ) -> StoreResult<Location> {
        let mut location = self.get_location(id)?;
        location.rename(name, description.map(str::to_string))?;
        let conn = self.conn()?;
        conn.execute(
            "UPDATE locations SET name = ?2, description = ?3 WHERE location_id = ?1",
            params![id.as_str(), location.name(), location.description()],
        )
        .map_err(db_err)?;
        Ok(location)
    }

    fn get_location(&self, id: &LocationId) -> StoreResult<Location> {
        let conn = self.conn()?;
        let row: Option<EntityRow> = conn
            .query_row(
                "SELECT location_id, name, description FROM locations WHERE location_id = ?1",
                params![id.as_str()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()
            .map_err(db_err)?;
        match row {
            Some(row) => location_from_row(row),
            None => Err(DomainError::NotFound.into()),
        }
    }

    fn list_locations(&self) -> StoreResult<Vec<Location>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT location_id, name, description FROM locations ORDER BY name ASC, location_id ASC")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))
            .map_err(db_err)?
            .collect::<Result<Vec<EntityRow>, _>>()
            .map_err(db_err)?;
        rows.into_iter().map(location_from_row).collect()
    }

    fn append_movement(&self, movement: Movement) -> StoreResult<Movement> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO movements (movement_id, timestamp, product_id, from_location, to_location, qty)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                movement.id().as_str(),
                // fixed-width fraction keeps text ordering chronological
                movement.timestamp().to_rfc3339_opts(SecondsFormat::Micros, true),
                movement.product_id().as_str(),
                movement.from_location().map(|l| l.as_str()),
                movement.to_location().map(|l| l.as_str()),
                movement.qty(),
            ],
        )
        .map_err(db_err)?;
        Ok(movement)
    }

    fn list_movements(&self, limit: Option<usize>) -> StoreResult<Vec<Movement>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT movement_id, timestamp, product_id, from_location, to_location, qty
                 FROM movements ORDER BY timestamp DESC, seq DESC LIMIT ?1",
            )
            .map_err(db_err)?;
        // SQLite treats LIMIT -1 as unbounded
        let limit = limit.map(|l| l as i64).unwrap_or(-1);
        let rows = stmt
            .query_map(params![limit], |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            })
            .map_err(db_err)?
            .collect::<Result<Vec<MovementRow>, _>>()
            .map_err(db_err)?;
        rows.into_iter().map(movement_from_row).collect()
    }
}
