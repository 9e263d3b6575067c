use chrono::{NaiveDate, NaiveTime};
use serde::{Serialize, Serializer};

use crate::{
    engine::{Direction, SpeedBand},
    shared::time::Duration,
};

/// One report line: a trip with its reference data, identity and derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTripRow {
    #[serde(rename = "EMPRESA")]
    pub company: String,
    #[serde(rename = "PREFIXO")]
    pub prefix: String,
    #[serde(rename = "CODIGO_LINHA")]
    pub route_code: String,
    #[serde(rename = "SENTIDO")]
    pub direction: Direction,
    #[serde(rename = "DATA_INICIO_VIAGEM", serialize_with = "date")]
    pub trip_date: NaiveDate,
    #[serde(rename = "HORA_INICIO_VIAGEM", serialize_with = "clock")]
    pub start_time: NaiveTime,
    #[serde(rename = "HORA_FINAL_VIAGEM", serialize_with = "clock")]
    pub end_time: NaiveTime,
    #[serde(rename = "QTE_PAX_PAGANTES")]
    pub paying: u32,
    #[serde(rename = "QTE_IDOSO")]
    pub elderly: u32,
    #[serde(rename = "QTE_PL")]
    pub free_pass: u32,
    #[serde(rename = "QTE_OUTRAS_GRATUIDADE")]
    pub other_gratuity: u32,
    #[serde(rename = "QTE_TOTAL_PAX")]
    pub total_passengers: u32,
    #[serde(rename = "QTE_PAGO_DINHEIRO")]
    pub cash_paid: u32,
    #[serde(rename = "QTE_PAGO_ELETRONICO")]
    pub electronic_paid: u32,
    #[serde(rename = "DISTANCIA_VIAGEM")]
    pub distance_km: u32,
    #[serde(rename = "TEMPO_VIAGEM", serialize_with = "hms")]
    pub elapsed: Duration,
    #[serde(rename = "VELOCIDADE_MEDIA")]
    pub average_speed_kmh: u32,
    #[serde(rename = "LT_ABERTURA_VIAGEM")]
    pub open_latitude: String,
    #[serde(rename = "LG_ABERTURA_VIAGEM")]
    pub open_longitude: String,
    #[serde(rename = "LT_FECHAMENTO_VIAGEM")]
    pub close_latitude: String,
    #[serde(rename = "LG_FECHAMENTO_VIAGEM")]
    pub close_longitude: String,
    #[serde(rename = "VEICULO_NUMERO")]
    pub vehicle_plate: String,
    #[serde(rename = "CPF_RODOVIARIO")]
    pub driver_document: String,
    #[serde(skip)]
    pub speed_band: SpeedBand,
}

fn date<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%d/%m/%Y"))
}

fn clock<S: Serializer>(value: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&value.format("%H:%M:%S"))
}

fn hms<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}
