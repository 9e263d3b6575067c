pub mod btc;
pub mod config;
pub mod engine;
pub mod identity;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod shared;
pub mod store;

pub use pipeline::{Error, Pipeline};

pub mod prelude {
    pub use crate::btc::{Batch, Btcs, FareCategory, FareEvent, Trip};
    pub use crate::config::{Config, ReferenceSource};
    pub use crate::engine::{
        Direction, DirectionAssigner, EnrichedTripRow, Enricher, FareTally, SpeedBand,
        SpeedPolicy,
    };
    pub use crate::identity::{IdentityLookup, IdentityResolver, PersonnelStore};
    pub use crate::pipeline::Pipeline;
    pub use crate::reference::{
        CachedReferenceData, ReferenceData, ReferenceStore, RouteParameters, StaticReferenceData,
    };
    pub use crate::shared::{Lookup, geo::Distance, time::Duration};
    pub use crate::store::Database;
}
