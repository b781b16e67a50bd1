use serde::{de::IgnoredAny, Deserialize, Deserializer, Serialize};
use time::OffsetDateTime;

use super::{classifier::classify, repo_types::BmiRecord};

/// Request body for a BMI submission. Numbers may also arrive as numeric
/// strings from HTML form fields. Missing, `null` or non-numeric values are
/// `None` and rejected later with a per-field message.
#[derive(Debug, Deserialize)]
pub struct BmiRequest {
    #[serde(default, deserialize_with = "number_or_string")]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "number_or_string")]
    pub height: Option<f64>,
}

fn number_or_string<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(de)? {
        Raw::Number(n) => Some(n),
        Raw::Text(s) => s.trim().parse::<f64>().ok(),
        Raw::Other(_) => None,
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: i64,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&BmiRecord> for RecordView {
    fn from(r: &BmiRecord) -> Self {
        Self {
            id: r.id,
            height: r.height,
            weight: r.weight,
            bmi: r.bmi,
            created_at: r.created_at,
        }
    }
}

/// A record together with its classification.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BmiResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    pub bmi: f64,
    pub category: &'static str,
    pub color: &'static str,
    pub text_color: &'static str,
    pub tips: &'static [&'static str],
    pub record: RecordView,
}

impl From<&BmiRecord> for BmiResponse {
    fn from(r: &BmiRecord) -> Self {
        let category = classify(r.bmi);
        Self {
            message: None,
            bmi: r.bmi,
            category: category.label(),
            color: category.color(),
            text_color: category.text_color(),
            tips: category.tips(),
            record: r.into(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub category: &'static str,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&BmiRecord> for HistoryEntry {
    fn from(r: &BmiRecord) -> Self {
        Self {
            id: r.id,
            height: r.height,
            weight: r.weight,
            bmi: r.bmi,
            category: classify(r.bmi).label(),
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<HistoryEntry>,
}
