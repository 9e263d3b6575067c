use std::{collections::HashMap, fs, io::Read, path::Path, sync::Arc, time::Instant};

use csv::Reader;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{
    reference::{self, ReferenceData, RouteParameters, RouteRecord, VehicleRecord},
    shared::Lookup,
};

const EMBEDDED_ROUTES: &str = include_str!("../../data/routes.csv");
const EMBEDDED_VEHICLES: &str = include_str!("../../data/vehicles.csv");

/// Route and fleet tables held in memory, loaded once from CSV.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceData {
    routes: HashMap<Arc<str>, Arc<RouteParameters>>,
    plates: HashMap<Arc<str>, Arc<str>>,
}

impl StaticReferenceData {
    pub fn new() -> Self {
        Default::default()
    }

    /// Tables compiled into the binary.
    pub fn embedded() -> Result<Self, reference::Error> {
        Self::from_readers(EMBEDDED_ROUTES.as_bytes(), EMBEDDED_VEHICLES.as_bytes())
    }

    pub fn from_paths<P, Q>(routes: P, vehicles: Q) -> Result<Self, reference::Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let routes = fs::File::open(routes)?;
        let vehicles = fs::File::open(vehicles)?;
        Self::from_readers(routes, vehicles)
    }

    pub fn from_readers<R, V>(routes: R, vehicles: V) -> Result<Self, reference::Error>
    where
        R: Read,
        V: Read,
    {
        let now = Instant::now();
        let data = Self::new().load_routes(routes)?.load_vehicles(vehicles)?;
        debug!(
            "Loading {} routes and {} vehicles took {:?}",
            data.routes.len(),
            data.plates.len(),
            now.elapsed()
        );
        Ok(data)
    }

    fn load_routes<R: Read>(mut self, reader: R) -> Result<Self, reference::Error> {
        let mut records: Vec<RouteRecord> = Vec::new();
        parse_csv(&mut records, reader)?;
        for record in records {
            let route: RouteParameters = record.into();
            let code: Arc<str> = route.code.as_str().into();
            if self.routes.insert(code, Arc::new(route.clone())).is_some() {
                return Err(reference::Error::DuplicateCode {
                    kind: "route",
                    code: route.code,
                });
            }
        }
        Ok(self)
    }

    fn load_vehicles<R: Read>(mut self, reader: R) -> Result<Self, reference::Error> {
        let mut records: Vec<VehicleRecord> = Vec::new();
        parse_csv(&mut records, reader)?;
        for record in records {
            let code = record.code.trim().to_string();
            let plate: Arc<str> = record.plate.trim().into();
            if self.plates.insert(code.as_str().into(), plate).is_some() {
                return Err(reference::Error::DuplicateCode {
                    kind: "vehicle",
                    code,
                });
            }
        }
        Ok(self)
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn vehicle_count(&self) -> usize {
        self.plates.len()
    }
}

impl ReferenceData for StaticReferenceData {
    fn route(&self, code: &str) -> Lookup<Arc<RouteParameters>> {
        self.routes.get(code.trim()).cloned().into()
    }

    fn vehicle_plate(&self, code: &str) -> Lookup<String> {
        self.plates
            .get(code.trim())
            .filter(|plate| !plate.is_empty())
            .map(|plate| plate.to_string())
            .into()
    }
}

fn parse_csv<R, T>(buf: &mut Vec<T>, reader: R) -> Result<(), reference::Error>
where
    R: Read,
    T: DeserializeOwned,
{
    let mut rdr = Reader::from_reader(reader);
    for result in rdr.deserialize() {
        let record: T = result?;
        buf.push(record);
    }
    Ok(())
}

#[test]
fn embedded_tables_load_test() {
    let data = StaticReferenceData::embedded().unwrap();
    assert_eq!(data.route_count(), 30);
    assert_eq!(data.vehicle_count(), 70);
}
