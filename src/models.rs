use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One stored survey submission: the raw form fields plus the `ts` stamped at save time.
///
/// Kept as an open JSON object so fields this crate does not know about survive
/// a load/save cycle untouched.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(transparent)]
pub struct SurveyResponse(pub BTreeMap<String, Value>);

impl SurveyResponse {
    pub fn from_fields(fields: BTreeMap<String, String>) -> Self {
        Self(
            fields
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    pub fn with_timestamp(mut self, ts: i64) -> Self {
        self.0.insert("ts".to_string(), Value::from(ts));
        self
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.field(name).and_then(Value::as_str)
    }

    /// Finite numeric value of a field, whether stored as a string or a JSON number.
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.field(name)? {
            Value::String(raw) => parse_finite(raw),
            Value::Number(num) => num.as_f64().filter(|value| value.is_finite()),
            _ => None,
        }
    }

    pub fn ts(&self) -> Option<i64> {
        self.field("ts").and_then(Value::as_i64)
    }
}

pub fn parse_finite(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub n: usize,
    pub psm_avg: Option<f64>,
    pub attach_avg: Option<f64>,
    pub otc_avg: Option<f64>,
}

/// Static scenario inputs as configured for the page; `None` means "use the default".
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScenarioInputs {
    pub price: Option<f64>,
    pub attach: Option<f64>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scenario {
    pub price: f64,
    pub attach: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketBand {
    pub low: i64,
    pub high: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RevenueMix {
    pub consult: f64,
    pub otc: f64,
    pub consult_share: f64,
    pub otc_share: f64,
    pub consult_display: i64,
    pub otc_display: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryDisplay {
    pub n: usize,
    pub psm: String,
    pub attach: String,
    pub otc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct KpiDisplay {
    pub price: String,
    pub attach: String,
    pub ticket: String,
    pub stacked_columns: String,
    pub legend_consult: String,
    pub legend_otc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioResponse {
    pub scenario: Scenario,
    pub ticket: TicketBand,
    pub mix: RevenueMix,
    pub kpis: KpiDisplay,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryResponse {
    pub aggregate: AggregateResult,
    pub display: SummaryDisplay,
    #[serde(flatten)]
    pub applied: ScenarioResponse,
}

#[derive(Debug, Deserialize)]
pub struct ScenarioQuery {
    pub price: Option<String>,
    pub attach: Option<String>,
}
