use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use csv::WriterBuilder;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

use crate::engine::EnrichedTripRow;

pub const DELIMITER: u8 = b';';

/// Column names, in report order.
pub const HEADERS: [&str; 23] = [
    "EMPRESA",
    "PREFIXO",
    "CODIGO_LINHA",
    "SENTIDO",
    "DATA_INICIO_VIAGEM",
    "HORA_INICIO_VIAGEM",
    "HORA_FINAL_VIAGEM",
    "QTE_PAX_PAGANTES",
    "QTE_IDOSO",
    "QTE_PL",
    "QTE_OUTRAS_GRATUIDADE",
    "QTE_TOTAL_PAX",
    "QTE_PAGO_DINHEIRO",
    "QTE_PAGO_ELETRONICO",
    "DISTANCIA_VIAGEM",
    "TEMPO_VIAGEM",
    "VELOCIDADE_MEDIA",
    "LT_ABERTURA_VIAGEM",
    "LG_ABERTURA_VIAGEM",
    "LT_FECHAMENTO_VIAGEM",
    "LG_FECHAMENTO_VIAGEM",
    "VEICULO_NUMERO",
    "CPF_RODOVIARIO",
];

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Could not persist report to {path}: {source}")]
    Persist { path: PathBuf, source: io::Error },
}

/// Writes the header and one line per row.
pub fn write_rows<W: Write>(writer: W, rows: &[EnrichedTripRow]) -> Result<(), self::Error> {
    let mut wtr = WriterBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the report next to `path` and moves it in place once complete.
pub fn write_to_path<P: AsRef<Path>>(path: P, rows: &[EnrichedTripRow]) -> Result<PathBuf, self::Error> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir)?;
    write_rows(file.as_file_mut(), rows)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|err| Error::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(path.to_path_buf())
}
