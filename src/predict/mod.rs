// src/predict/mod.rs — Prediction inputs and the `/predict` request body.
//
// Numeric entries are free text. Anything that does not start with a number
// is sent as 0; submission is never blocked on malformed input.

pub mod fields;
pub mod form;

use serde::{Deserialize, Serialize};

pub use fields::{CategoricalField, FormField, NumberKind, NumericField};
pub use form::{PredictionForm, PredictionOutcome};

/// Body of `POST /predict`. Field names are the backend's feature columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    #[serde(rename = "Budget")]
    pub budget: f64,
    #[serde(rename = "Clicks")]
    pub clicks: i64,
    #[serde(rename = "CTR")]
    pub ctr: f64,
    #[serde(rename = "CPC")]
    pub cpc: f64,
    #[serde(rename = "Conversions")]
    pub conversions: i64,
    #[serde(rename = "CPA")]
    pub cpa: f64,
    #[serde(rename = "Conversion_Rate")]
    pub conversion_rate: f64,
    #[serde(rename = "Duration")]
    pub duration: i64,
    #[serde(rename = "Revenue")]
    pub revenue: f64,
    #[serde(rename = "Spend")]
    pub spend: f64,
    #[serde(rename = "Impressions")]
    pub impressions: i64,
    #[serde(rename = "Platform")]
    pub platform: String,
    #[serde(rename = "Content_Type")]
    pub content_type: String,
    #[serde(rename = "Target_Age")]
    pub target_age: String,
    #[serde(rename = "Target_Gender")]
    pub target_gender: String,
    #[serde(rename = "Region")]
    pub region: String,
}

impl PredictionRequest {
    /// Build a request from raw text entries. `numeric` yields (field, text)
    /// pairs, `categorical` yields (field, selected value); missing entries
    /// become 0 and "" respectively.
    pub fn from_entries<'a>(
        numeric: impl IntoIterator<Item = (NumericField, &'a str)>,
        categorical: impl IntoIterator<Item = (CategoricalField, &'a str)>,
    ) -> Self {
        let mut req = Self::default();
        for (field, raw) in numeric {
            req.set_numeric(field, raw);
        }
        for (field, value) in categorical {
            req.set_categorical(field, value);
        }
        req
    }

    /// Coerce `raw` according to the field's [`NumberKind`] and store it.
    pub fn set_numeric(&mut self, field: NumericField, raw: &str) {
        match field.kind() {
            NumberKind::Integer => {
                if let Some(slot) = self.integer_slot(field) {
                    *slot = coerce_int(raw);
                }
            }
            NumberKind::Float => {
                if let Some(slot) = self.float_slot(field) {
                    *slot = coerce_float(raw);
                }
            }
        }
    }

    fn integer_slot(&mut self, field: NumericField) -> Option<&mut i64> {
        match field {
            NumericField::Clicks => Some(&mut self.clicks),
            NumericField::Conversions => Some(&mut self.conversions),
            NumericField::Duration => Some(&mut self.duration),
            NumericField::Impressions => Some(&mut self.impressions),
            _ => None,
        }
    }

    fn float_slot(&mut self, field: NumericField) -> Option<&mut f64> {
        match field {
            NumericField::Budget => Some(&mut self.budget),
            NumericField::Ctr => Some(&mut self.ctr),
            NumericField::Cpc => Some(&mut self.cpc),
            NumericField::Cpa => Some(&mut self.cpa),
            NumericField::ConversionRate => Some(&mut self.conversion_rate),
            NumericField::Revenue => Some(&mut self.revenue),
            NumericField::Spend => Some(&mut self.spend),
            _ => None,
        }
    }

    pub fn set_categorical(&mut self, field: CategoricalField, value: &str) {
        let slot = match field {
            CategoricalField::Platform => &mut self.platform,
            CategoricalField::ContentType => &mut self.content_type,
            CategoricalField::TargetAge => &mut self.target_age,
            CategoricalField::TargetGender => &mut self.target_gender,
            CategoricalField::Region => &mut self.region,
        };
        *slot = value.to_string();
    }
}

/// Length of the longest prefix of `s` that reads as a decimal number
/// (`[+-]digits[.digits][e[+-]digits]`), or 0 if there is none.
fn number_prefix_len(s: &str, allow_fraction: bool) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if allow_fraction && i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return 0;
    }

    if allow_fraction && i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if matches!(bytes.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}

/// Lenient float parse: leading whitespace is skipped, trailing garbage is
/// ignored, and no number at all (or a non-finite one) yields 0.
pub fn coerce_float(raw: &str) -> f64 {
    let s = raw.trim_start();
    let len = number_prefix_len(s, true);
    match s[..len].parse::<f64>() {
        Ok(v) if v.is_finite() && v != 0.0 => v,
        _ => 0.0,
    }
}

/// Lenient integer parse: like [`coerce_float`] but stops at the decimal
/// point, so "12.9" is 12. Out-of-range values saturate.
pub fn coerce_int(raw: &str) -> i64 {
    let s = raw.trim_start();
    let len = number_prefix_len(s, false);
    match s[..len].parse::<i64>() {
        Ok(v) => v,
        Err(_) if len > 0 => s[..len].parse::<f64>().map(|v| v as i64).unwrap_or(0),
        Err(_) => 0,
    }
}
