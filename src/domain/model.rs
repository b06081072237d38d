use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::KisanError;

/// A produce listing as persisted in the listing board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub crop: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub location: String,
    pub contact: String,
}

/// User-submitted listing fields, before an id and timestamp are assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewListing {
    pub crop: String,
    pub quantity: f64,
    pub price_per_unit: f64,
    pub location: String,
    pub contact: String,
}

impl Listing {
    /// True when every user-supplied field matches `fields`.
    pub fn matches(&self, fields: &NewListing) -> bool {
        self.crop == fields.crop
            && self.quantity == fields.quantity
            && self.price_per_unit == fields.price_per_unit
            && self.location == fields.location
            && self.contact == fields.contact
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: f64,
    pub annual_rate_percent: f64,
    pub term_months: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmiBreakdown {
    pub installment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Wheat,
    Rice,
    Maize,
    Cotton,
    Sugarcane,
    Soybean,
    Mustard,
}

impl Crop {
    pub const ALL: [Crop; 7] = [
        Crop::Wheat,
        Crop::Rice,
        Crop::Maize,
        Crop::Cotton,
        Crop::Sugarcane,
        Crop::Soybean,
        Crop::Mustard,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Crop::Wheat => "wheat",
            Crop::Rice => "rice",
            Crop::Maize => "maize",
            Crop::Cotton => "cotton",
            Crop::Sugarcane => "sugarcane",
            Crop::Soybean => "soybean",
            Crop::Mustard => "mustard",
        }
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Crop {
    type Err = KisanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Crop::ALL
            .into_iter()
            .find(|crop| crop.key() == wanted)
            .ok_or_else(|| KisanError::invalid_argument("crop", s, "Unknown crop"))
    }
}

/// Farming practice multiplier applied to the base yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeFactor {
    Traditional,
    Standard,
    Improved,
}

impl PracticeFactor {
    pub fn multiplier(&self) -> f64 {
        match self {
            PracticeFactor::Traditional => 0.9,
            PracticeFactor::Standard => 1.0,
            PracticeFactor::Improved => 1.1,
        }
    }

    /// Accepts only the three supported multipliers.
    pub fn from_multiplier(value: f64) -> Result<Self, KisanError> {
        [
            PracticeFactor::Traditional,
            PracticeFactor::Standard,
            PracticeFactor::Improved,
        ]
        .into_iter()
        .find(|factor| (factor.multiplier() - value).abs() < 1e-9)
        .ok_or_else(|| {
            KisanError::invalid_argument("practice_factor", value, "Must be one of 0.9, 1.0, 1.1")
        })
    }
}

impl FromStr for PracticeFactor {
    type Err = KisanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "traditional" => Ok(PracticeFactor::Traditional),
            "standard" => Ok(PracticeFactor::Standard),
            "improved" => Ok(PracticeFactor::Improved),
            other => match other.parse::<f64>() {
                Ok(value) => PracticeFactor::from_multiplier(value),
                Err(_) => Err(KisanError::invalid_argument(
                    "practice_factor",
                    s,
                    "Expected traditional, standard, improved or 0.9/1.0/1.1",
                )),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldInputs {
    pub crop: Crop,
    pub area_units: f64,
    pub practice_factor: PracticeFactor,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YieldEstimate {
    pub crop: Crop,
    pub expected_yield: f64,
    pub approximate_revenue: f64,
}

/// Advisory text produced by the trend heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    Hold,
    Neutral,
    #[serde(rename = "Sell Soon")]
    SellSoon,
}

impl Advice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advice::Hold => "Hold",
            Advice::Neutral => "Neutral",
            Advice::SellSoon => "Sell Soon",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiseaseReport {
    pub disease: String,
    pub remedy: String,
    #[serde(default)]
    pub confidence: f64,
}

impl DiseaseReport {
    /// Placeholder shown when the detection service cannot be reached.
    pub fn fallback() -> Self {
        Self {
            disease: "Unavailable".to_string(),
            remedy: "Detection service is offline. Consult your local agriculture officer."
                .to_string(),
            confidence: 0.0,
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    CropDoctor,
    Market,
    Listings,
    Weather,
    Assistant,
    Finance,
}

impl View {
    pub const ALL: [View; 6] = [
        View::CropDoctor,
        View::Market,
        View::Listings,
        View::Weather,
        View::Assistant,
        View::Finance,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            View::CropDoctor => "crop-doctor",
            View::Market => "market",
            View::Listings => "listings",
            View::Weather => "weather",
            View::Assistant => "assistant",
            View::Finance => "finance",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for View {
    type Err = KisanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        View::ALL
            .into_iter()
            .find(|view| view.id() == wanted)
            .ok_or_else(|| KisanError::invalid_argument("view", s, "Unknown view"))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MandiQuote {
    pub commodity: String,
    pub price: f64,
    pub state: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherAdvisory {
    pub city: String,
    pub temp_celsius: f64,
    pub condition: String,
    pub advice: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_parses_case_insensitively() {
        assert_eq!("Wheat".parse::<Crop>().unwrap(), Crop::Wheat);
        assert_eq!(" RICE ".parse::<Crop>().unwrap(), Crop::Rice);
        assert!(matches!(
            "banana".parse::<Crop>(),
            Err(KisanError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_practice_factor_accepts_only_known_multipliers() {
        assert_eq!(
            PracticeFactor::from_multiplier(1.1).unwrap(),
            PracticeFactor::Improved
        );
        assert_eq!("0.9".parse::<PracticeFactor>().unwrap(), PracticeFactor::Traditional);
        assert!(PracticeFactor::from_multiplier(1.2).is_err());
        assert!("organic".parse::<PracticeFactor>().is_err());
    }

    #[test]
    fn test_listing_serializes_camel_case() {
        let listing = Listing {
            id: "abc".to_string(),
            created_at: Utc::now(),
            crop: "Wheat".to_string(),
            quantity: 10.0,
            price_per_unit: 2100.0,
            location: "Ludhiana".to_string(),
            contact: "98765".to_string(),
        };
        let json = serde_json::to_value(&listing).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("pricePerUnit").is_some());
    }

    #[test]
    fn test_view_ids_round_trip_through_text() {
        for view in View::ALL {
            assert_eq!(view.id().parse::<View>().unwrap(), view);
        }
        assert_eq!(View::default(), View::CropDoctor);
    }

    #[test]
    fn test_disease_report_confidence_defaults_to_zero() {
        let report: DiseaseReport =
            serde_json::from_str(r#"{"disease":"blight","remedy":"Apply fungicide."}"#).unwrap();
        assert_eq!(report.confidence, 0.0);
        assert!(!report.is_fallback());
        assert!(DiseaseReport::fallback().is_fallback());
    }
}
