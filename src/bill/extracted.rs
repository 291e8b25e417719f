//! Output contract of the bill-extraction collaborator.
//!
//! Every field is independently optional: absence is an expected state,
//! not an error.

use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedBill {
    /// Total consumption over the billing period, as printed on the bill.
    pub kwh: Option<f64>,

    pub billing_days: Option<u32>,

    pub period_start: Option<NaiveDate>,

    pub period_end: Option<NaiveDate>,

    /// Supplier name, free text.
    pub provider: Option<String>,

    /// Tariff or package name, free text.
    pub tariff_name: Option<String>,

    /// Final payable amount, VAT included.
    pub bill_amount: Option<f64>,

    /// Per-zone consumption, present on zoned-tariff bills only.
    pub color_zones: Option<ZoneEnergy>,

    #[serde(deserialize_with = "Confidence::deserialize_lenient")]
    pub confidence: Confidence,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ZoneEnergy {
    pub blue: Option<f64>,
    pub green: Option<f64>,
    pub yellow: Option<f64>,
    pub red: Option<f64>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,

    Medium,

    #[default]
    Low,
}

impl Confidence {
    /// The model occasionally free-styles this field; anything that is not a
    /// known tier reads as low.
    fn deserialize_lenient<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<String>::deserialize(deserializer)?.as_deref() {
            Some(tier) if tier.eq_ignore_ascii_case("high") => Self::High,
            Some(tier) if tier.eq_ignore_ascii_case("medium") => Self::Medium,
            _ => Self::Low,
        })
    }
}

impl Display for Confidence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let bill: ExtractedBill = serde_json::from_str(
            r#"{
                "kwh": 250,
                "billingDays": 31,
                "provider": "ΔΕΗ",
                "tariffName": "myHome Enter",
                "billAmount": 61.20,
                "colorZones": {"blue": 90, "green": 80, "yellow": 50, "red": 30},
                "confidence": "high"
            }"#,
        )
        .unwrap();
        assert_eq!(bill.kwh, Some(250.0));
        assert_eq!(bill.billing_days, Some(31));
        assert_eq!(bill.confidence, Confidence::High);
        assert_eq!(bill.color_zones.unwrap().yellow, Some(50.0));
    }

    #[test]
    fn test_parse_partial_payload() {
        let bill: ExtractedBill =
            serde_json::from_str(r#"{"kwh": null, "provider": "NRG"}"#).unwrap();
        assert_eq!(bill.kwh, None);
        assert_eq!(bill.provider.as_deref(), Some("NRG"));
        assert_eq!(bill.confidence, Confidence::Low);
    }

    #[test]
    fn test_unknown_confidence_degrades_to_low() {
        let bill: ExtractedBill =
            serde_json::from_str(r#"{"confidence": "pretty sure"}"#).unwrap();
        assert_eq!(bill.confidence, Confidence::Low);
    }
}
