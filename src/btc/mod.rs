use quick_xml::{Reader, events::Event};
use std::{
    fs,
    io::{self, Read},
    path::Path,
    str::FromStr,
};
use thiserror::Error;
use tracing::debug;

pub mod models;
pub use models::*;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Xml error: {0}")]
    Xml(#[from] quick_xml::DeError),
    #[error("Xml syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),
    #[error("Unexpected root element <{0}>, expected <btcs>")]
    UnexpectedRoot(String),
    #[error("Document has no <btc> batch")]
    NoBatches,
}

impl Btcs {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, self::Error> {
        let path = path.as_ref();
        debug!("Reading btc file {}", path.display());
        fs::read_to_string(path)?.parse()
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, self::Error> {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;
        xml.parse()
    }

    /// Every trip paired with the batch it belongs to, in document order.
    pub fn trips(&self) -> impl Iterator<Item = (&Batch, &Trip)> {
        self.batches
            .iter()
            .flat_map(|batch| batch.operations.trips.iter().map(move |trip| (batch, trip)))
    }

    pub fn trip_count(&self) -> usize {
        self.batches
            .iter()
            .map(|batch| batch.operations.trips.len())
            .sum()
    }

    fn validated(self) -> Result<Self, self::Error> {
        if self.batches.is_empty() {
            return Err(self::Error::NoBatches);
        }
        debug!(
            "Parsed {} batches with {} trips",
            self.batches.len(),
            self.trip_count()
        );
        Ok(self)
    }
}

impl FromStr for Btcs {
    type Err = self::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check_root(s)?;
        let btcs: Btcs = quick_xml::de::from_str(s)?;
        btcs.validated()
    }
}

/// The deserializer ignores the root tag name, so it is checked up front.
fn check_root(xml: &str) -> Result<(), self::Error> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event()? {
            Event::Start(tag) | Event::Empty(tag) => {
                let name = tag.name();
                return match name.as_ref() {
                    b"btcs" => Ok(()),
                    other => Err(self::Error::UnexpectedRoot(
                        String::from_utf8_lossy(other).into_owned(),
                    )),
                };
            }
            Event::Eof => return Ok(()),
            _ => {}
        }
    }
}
