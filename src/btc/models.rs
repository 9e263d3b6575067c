use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename = "btcs")]
pub struct Btcs {
    #[serde(rename = "@versaoApp", default)]
    pub app_version: String,
    #[serde(rename = "@dataGeracao", default)]
    pub generated_at: String,
    #[serde(rename = "@DataIni", default)]
    pub period_start: String,
    #[serde(rename = "@DataFim", default)]
    pub period_end: String,
    #[serde(rename = "@CodFuncionario", default)]
    pub employee_code: String,
    #[serde(rename = "@NFuncionario", default)]
    pub employee_name: String,
    #[serde(rename = "@CodEmpresa", default)]
    pub company_code: String,
    #[serde(rename = "btc", default)]
    pub batches: Vec<Batch>,
}

/// One driver shift: every trip in it shares the personnel code.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Batch {
    #[serde(rename = "@doc", default)]
    pub doc: String,
    #[serde(rename = "@matdmtu", default)]
    pub personnel_code: String,
    #[serde(rename = "@data", default)]
    pub date: String,
    #[serde(rename = "@nome", default)]
    pub driver_name: String,
    #[serde(rename = "@codigoTD", default)]
    pub terminal_code: String,
    #[serde(rename = "operacoes", default)]
    pub operations: Operations,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Operations {
    #[serde(rename = "operacao", default)]
    pub trips: Vec<Trip>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Trip {
    #[serde(rename = "@codigoEmpresa", default)]
    pub company_code: String,
    #[serde(rename = "@veiculo", default)]
    pub vehicle: String,
    #[serde(rename = "@linha", default)]
    pub route: String,
    #[serde(rename = "@roletaInicial", default)]
    pub turnstile_start: String,
    #[serde(rename = "@roletaFinal", default)]
    pub turnstile_end: String,
    #[serde(rename = "@totalPassageiros", default)]
    pub total_passengers: String,
    #[serde(rename = "@tarifaAtual", default)]
    pub fare: String,
    #[serde(rename = "@Receita", default)]
    pub revenue: String,
    #[serde(rename = "@datainicio", default)]
    pub started_at: String,
    #[serde(rename = "@datafim", default)]
    pub ended_at: String,
    #[serde(rename = "passageiros", default)]
    pub passengers: Passengers,
    #[serde(rename = "coletas", default)]
    pub collections: Option<Collections>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Passengers {
    #[serde(rename = "passageiro", default)]
    pub fares: Vec<FareEvent>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FareEvent {
    #[serde(rename = "@tipo", default)]
    pub category: String,
    #[serde(rename = "@vlUnitario", default)]
    pub unit_value: String,
    #[serde(rename = "@qtd", default)]
    pub quantity: String,
    #[serde(rename = "@qtdCreditos", default)]
    pub credits: String,
    #[serde(rename = "@idoso", default)]
    pub elderly: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Collections {
    #[serde(rename = "@recebido", default)]
    pub received: String,
    #[serde(rename = "@girosPagantes", default)]
    pub paying_turns: String,
    #[serde(rename = "@girosCartoes", default)]
    pub card_turns: String,
    #[serde(rename = "@engolidos", default)]
    pub swallowed: String,
}

/// Payment category recorded by the validator, `tipo` in the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FareCategory {
    ElectronicVt,
    ElectronicCommon,
    FreePass,
    Cash,
    Elderly,
    Employee,
}

impl FareCategory {
    pub const fn code(&self) -> u8 {
        match self {
            FareCategory::ElectronicVt => 1,
            FareCategory::ElectronicCommon => 2,
            FareCategory::FreePass => 3,
            FareCategory::Cash => 4,
            FareCategory::Elderly => 5,
            FareCategory::Employee => 6,
        }
    }
}

impl TryFrom<&str> for FareCategory {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "1" => Ok(FareCategory::ElectronicVt),
            "2" => Ok(FareCategory::ElectronicCommon),
            "3" => Ok(FareCategory::FreePass),
            "4" => Ok(FareCategory::Cash),
            "5" => Ok(FareCategory::Elderly),
            "6" => Ok(FareCategory::Employee),
            _ => Err(()),
        }
    }
}

impl FareEvent {
    pub fn fare_category(&self) -> Option<FareCategory> {
        FareCategory::try_from(self.category.as_str()).ok()
    }

    /// Unparseable quantities count as zero.
    pub fn quantity(&self) -> u32 {
        parse_count(&self.quantity)
    }
}

impl Trip {
    /// Unparseable totals count as zero.
    pub fn total_passengers(&self) -> u32 {
        parse_count(&self.total_passengers)
    }
}

pub(crate) fn parse_count(value: &str) -> u32 {
    value.trim().parse().unwrap_or_default()
}
