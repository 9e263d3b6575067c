use std::{path::PathBuf, time::Duration};

use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params, types::Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    identity::PersonnelStore,
    reference::{ReferenceStore, RouteParameters, RouteRecord},
};

#[derive(Error, Debug)]
pub enum Error {
    #[error("Sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Unsupported database url scheme: {0}")]
    UnsupportedUrl(String),
}

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS pessoa (
        id_pessoa INTEGER PRIMARY KEY,
        cod_identificador INTEGER NOT NULL,
        cpf TEXT,
        funcao TEXT,
        status INTEGER DEFAULT 1
    );
    CREATE INDEX IF NOT EXISTS idx_pessoa_cod_identificador ON pessoa(cod_identificador);
    CREATE TABLE IF NOT EXISTS linha (
        codigo TEXT PRIMARY KEY,
        origem TEXT NOT NULL,
        destino TEXT NOT NULL,
        nome TEXT NOT NULL,
        registro TEXT NOT NULL,
        distancia_km REAL,
        duracao_min INTEGER,
        origem_lat TEXT NOT NULL DEFAULT '',
        origem_lon TEXT NOT NULL DEFAULT '',
        destino_lat TEXT NOT NULL DEFAULT '',
        destino_lon TEXT NOT NULL DEFAULT ''
    );
    CREATE TABLE IF NOT EXISTS veiculo (
        codigo TEXT PRIMARY KEY,
        placa TEXT NOT NULL
    );
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    Memory,
    File(PathBuf),
}

impl Location {
    /// Accepts `sqlite://path`, `sqlite:path`, `:memory:` or a plain path.
    pub fn parse(url: &str) -> Result<Self, self::Error> {
        let url = url.trim();
        let path = url
            .strip_prefix("sqlite://")
            .or_else(|| url.strip_prefix("sqlite:"))
            .unwrap_or(url);
        if path.is_empty() || (path.contains("://") && !path.starts_with('/')) {
            return Err(self::Error::UnsupportedUrl(scheme_of(url)));
        }
        if path == ":memory:" {
            Ok(Location::Memory)
        } else {
            Ok(Location::File(PathBuf::from(path)))
        }
    }
}

fn scheme_of(url: &str) -> String {
    url.split("://").next().unwrap_or(url).to_string()
}

/// Personnel and reference tables behind a single connection.
pub struct Database {
    connection: Mutex<Connection>,
}

impl Database {
    pub fn open(url: &str, timeout: Duration) -> Result<Self, self::Error> {
        let connection = match Location::parse(url)? {
            Location::Memory => Connection::open_in_memory()?,
            Location::File(path) => {
                debug!("Opening database {}", path.display());
                Connection::open(path)?
            }
        };
        connection.busy_timeout(timeout)?;
        connection.execute_batch(SCHEMA)?;
        info!("Database ready");
        Ok(Self {
            connection: Mutex::new(connection),
        })
    }

    pub fn in_memory() -> Result<Self, self::Error> {
        Self::open(":memory:", Duration::from_secs(5))
    }

    pub fn ping(&self) -> Result<(), self::Error> {
        let one: i64 = self
            .connection
            .lock()
            .query_row("SELECT 1", [], |row| row.get(0))?;
        debug!("Database ping returned {one}");
        Ok(())
    }

    pub fn personnel_count(&self) -> Result<u64, self::Error> {
        let count: i64 =
            self.connection
                .lock()
                .query_row("SELECT COUNT(*) FROM pessoa", [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    pub fn insert_person(&self, code: i64, document: Option<&str>) -> Result<(), self::Error> {
        self.connection.lock().execute(
            "INSERT INTO pessoa (cod_identificador, cpf) VALUES (?1, ?2)",
            params![code, document],
        )?;
        Ok(())
    }

    pub fn insert_route(&self, route: &RouteRecord) -> Result<(), self::Error> {
        self.connection.lock().execute(
            "INSERT OR REPLACE INTO linha (codigo, origem, destino, nome, registro, distancia_km,
                duracao_min, origem_lat, origem_lon, destino_lat, destino_lon)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                route.code,
                route.origin,
                route.destination,
                route.name,
                route.registration,
                route.distance_km,
                route.duration_min,
                route.origin_lat,
                route.origin_lon,
                route.destination_lat,
                route.destination_lon,
            ],
        )?;
        Ok(())
    }

    pub fn insert_vehicle(&self, code: &str, plate: &str) -> Result<(), self::Error> {
        self.connection.lock().execute(
            "INSERT OR REPLACE INTO veiculo (codigo, placa) VALUES (?1, ?2)",
            params![code, plate],
        )?;
        Ok(())
    }
}

/// Numeric codes are bound as integers, anything else as text.
fn personnel_key(code: &str) -> Value {
    match code.parse::<i64>() {
        Ok(value) => Value::Integer(value),
        Err(_) => {
            debug!("Personnel code {code:?} is not numeric, querying as text");
            Value::Text(code.to_string())
        }
    }
}

impl PersonnelStore for Database {
    fn document_by_code(&self, code: &str) -> Result<Option<String>, self::Error> {
        let document: Option<Option<String>> = self
            .connection
            .lock()
            .query_row(
                "SELECT cpf FROM pessoa WHERE cod_identificador = ?1",
                params![personnel_key(code)],
                |row| row.get(0),
            )
            .optional()?;
        Ok(document.flatten())
    }
}

impl ReferenceStore for Database {
    fn route(&self, code: &str) -> Result<Option<RouteParameters>, self::Error> {
        let record = self
            .connection
            .lock()
            .query_row(
                "SELECT codigo, origem, destino, nome, registro, distancia_km, duracao_min,
                    origem_lat, origem_lon, destino_lat, destino_lon
                 FROM linha WHERE codigo = ?1",
                params![code],
                |row| {
                    Ok(RouteRecord {
                        code: row.get(0)?,
                        origin: row.get(1)?,
                        destination: row.get(2)?,
                        name: row.get(3)?,
                        registration: row.get(4)?,
                        distance_km: row.get(5)?,
                        duration_min: row.get(6)?,
                        origin_lat: row.get(7)?,
                        origin_lon: row.get(8)?,
                        destination_lat: row.get(9)?,
                        destination_lon: row.get(10)?,
                    })
                },
            )
            .optional()?;
        Ok(record.map(RouteParameters::from))
    }

    fn vehicle_plate(&self, code: &str) -> Result<Option<String>, self::Error> {
        let plate = self
            .connection
            .lock()
            .query_row(
                "SELECT placa FROM veiculo WHERE codigo = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(plate)
    }
}

#[test]
fn location_parse_test() {
    assert_eq!(Location::parse(":memory:").unwrap(), Location::Memory);
    assert_eq!(
        Location::parse("sqlite:///var/lib/roleta.db").unwrap(),
        Location::File(PathBuf::from("/var/lib/roleta.db"))
    );
    assert_eq!(
        Location::parse("roleta.db").unwrap(),
        Location::File(PathBuf::from("roleta.db"))
    );
    assert!(Location::parse("postgres://user:pw@host/db").is_err());
}
