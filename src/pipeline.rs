use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::Arc,
    time::Instant,
};

use tracing::{info, warn};

use crate::{
    btc::{self, Btcs},
    config::{Config, ReferenceSource},
    engine::{self, DirectionAssigner, EnrichedTripRow, Enricher},
    identity::{IdentityLookup, IdentityResolver},
    reference::{self, CachedReferenceData, ReferenceData, StaticReferenceData},
    report,
    store::{self, Database},
};

/// Everything that can stop a conversion. No report is produced when one occurs.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Input error: {0}")]
    Input(#[from] btc::Error),
    #[error("Trip error: {0}")]
    Trip(#[from] engine::Error),
    #[error("Report error: {0}")]
    Report(#[from] report::Error),
    #[error("Reference data error: {0}")]
    Reference(#[from] reference::Error),
    #[error("Database error: {0}")]
    Store(#[from] store::Error),
}

/// Long-lived collaborators shared by every conversion.
///
/// Reference and identity caches live as long as the pipeline, direction
/// counters only as long as a single conversion.
#[derive(Clone)]
pub struct Pipeline {
    config: Arc<Config>,
    references: Arc<dyn ReferenceData>,
    identity: Arc<dyn IdentityLookup>,
}

impl Pipeline {
    pub fn new(
        config: Config,
        references: Arc<dyn ReferenceData>,
        identity: Arc<dyn IdentityLookup>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            references,
            identity,
        }
    }

    /// Wires collaborators from `config`.
    ///
    /// An unreachable database only disables driver lookups, unless it is also
    /// the reference source.
    pub fn from_config(config: Config) -> Result<(Self, Option<Arc<Database>>), self::Error> {
        let database = match &config.database_url {
            Some(url) => match Database::open(url, config.database_timeout) {
                Ok(database) => Some(Arc::new(database)),
                Err(err) => {
                    warn!("Database unavailable, driver documents will be blank: {err}");
                    None
                }
            },
            None => {
                warn!("No database configured, driver documents will be blank");
                None
            }
        };

        let identity: Arc<dyn IdentityLookup> = match &database {
            Some(database) => Arc::new(IdentityResolver::new(database.clone())),
            None => Arc::new(IdentityResolver::disconnected()),
        };

        let references: Arc<dyn ReferenceData> = match &config.reference_source {
            ReferenceSource::Embedded => Arc::new(StaticReferenceData::embedded()?),
            ReferenceSource::Files { routes, vehicles } => {
                Arc::new(StaticReferenceData::from_paths(routes, vehicles)?)
            }
            ReferenceSource::Database => {
                let database = match &database {
                    Some(database) => database.clone(),
                    None => {
                        let url = config.database_url.as_deref().unwrap_or_default();
                        Arc::new(Database::open(url, config.database_timeout)?)
                    }
                };
                Arc::new(CachedReferenceData::new(database))
            }
        };

        Ok((Self::new(config, references, identity), database))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn identity(&self) -> &dyn IdentityLookup {
        self.identity.as_ref()
    }

    /// Enriches every trip of the document, in document order.
    pub fn run(&self, btcs: &Btcs) -> Result<Vec<EnrichedTripRow>, self::Error> {
        let now = Instant::now();
        let enricher = Enricher::new(
            &self.config,
            self.references.as_ref(),
            self.identity.as_ref(),
        );
        let mut directions = DirectionAssigner::new();
        let mut rows = Vec::with_capacity(btcs.trip_count());
        for (batch, trip) in btcs.trips() {
            rows.push(enricher.enrich(&mut directions, &batch.personnel_code, trip)?);
        }
        let clamped = rows.iter().filter(|row| row.speed_band.is_clamped()).count();
        info!(
            "Enriched {} trips in {:?} ({} speeds clamped)",
            rows.len(),
            now.elapsed(),
            clamped
        );
        Ok(rows)
    }

    /// Converts the BTC file at `input` into a report at `output`.
    pub fn convert<P, Q>(&self, input: P, output: Q) -> Result<PathBuf, self::Error>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let btcs = Btcs::from_path(input)?;
        let rows = self.run(&btcs)?;
        Ok(report::write_to_path(output, &rows)?)
    }

    pub fn convert_to_writer<P, W>(&self, input: P, writer: W) -> Result<usize, self::Error>
    where
        P: AsRef<Path>,
        W: Write,
    {
        let btcs = Btcs::from_path(input)?;
        let rows = self.run(&btcs)?;
        report::write_rows(writer, &rows)?;
        Ok(rows.len())
    }
}
