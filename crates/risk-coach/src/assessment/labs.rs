use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw lab values exactly as submitted, keyed by whatever label the source used.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabValues(BTreeMap<String, Value>);

impl LabValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for LabValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

const SYNONYMS: &[(&str, &[&str])] = &[
    ("hba1c", &["hemoglobin_a1c", "glycated_hemoglobin", "a1c"]),
    ("fasting_glucose", &["fasting_blood_sugar", "fbs"]),
    ("ldl", &["ldl_cholesterol", "low_density_lipoprotein"]),
    ("hdl", &["hdl_cholesterol", "high_density_lipoprotein"]),
    ("triglycerides", &["tg"]),
    ("total_cholesterol", &["cholesterol"]),
    ("systolic_bp", &["systolic", "sbp"]),
    ("diastolic_bp", &["diastolic", "dbp"]),
    ("tsh", &["thyroid_stimulating_hormone"]),
    ("hemoglobin", &["hgb", "hb"]),
];

/// Canonical marker tag for a raw lab label.
///
/// Lower-cases, maps spaces and hyphens to underscores, then resolves known
/// synonyms. Unknown labels pass through in their cleaned form.
pub fn normalize_lab_key(raw: &str) -> String {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|ch| match ch {
            ' ' | '-' => '_',
            other => other.to_ascii_lowercase(),
        })
        .collect();

    SYNONYMS
        .iter()
        .find(|(_, variants)| variants.contains(&cleaned.as_str()))
        .map(|(canonical, _)| (*canonical).to_string())
        .unwrap_or(cleaned)
}

/// Numeric lab readings keyed by canonical marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabPanel {
    values: BTreeMap<String, f64>,
}

impl LabPanel {
    /// Normalize keys and coerce values. Non-numeric entries are dropped; when
    /// two labels resolve to one marker the first numeric value in label order
    /// is kept.
    pub fn from_values(raw: &LabValues) -> Self {
        let mut values = BTreeMap::new();
        for (key, value) in raw.iter() {
            let Some(number) = coerce_number(value) else {
                tracing::debug!(marker = %key, "skipping non-numeric lab value");
                continue;
            };
            values.entry(normalize_lab_key(key)).or_insert(number);
        }
        Self { values }
    }

    pub fn get(&self, marker: &str) -> Option<f64> {
        self.values.get(marker).copied()
    }

    /// Value of `marker`, or zero when it was not supplied.
    pub fn value_or_zero(&self, marker: &str) -> f64 {
        self.get(marker).unwrap_or(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64()?,
        Value::String(text) => text.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Display metadata for known markers.
pub(crate) fn marker_label(marker: &str) -> (String, &'static str) {
    let known = match marker {
        "hba1c" => Some(("HbA1c", "%")),
        "fasting_glucose" => Some(("Fasting glucose", " mg/dL")),
        "ldl" => Some(("LDL cholesterol", " mg/dL")),
        "hdl" => Some(("HDL cholesterol", " mg/dL")),
        "triglycerides" => Some(("Triglycerides", " mg/dL")),
        "total_cholesterol" => Some(("Total cholesterol", " mg/dL")),
        "systolic_bp" => Some(("Systolic blood pressure", " mmHg")),
        "diastolic_bp" => Some(("Diastolic blood pressure", " mmHg")),
        "tsh" => Some(("TSH", " mIU/L")),
        "hemoglobin" => Some(("Hemoglobin", " g/dL")),
        "mcv" => Some(("MCV", " fL")),
        "mch" => Some(("MCH", " pg")),
        "t4" => Some(("T4", " ng/dL")),
        _ => None,
    };

    match known {
        Some((label, unit)) => (label.to_string(), unit),
        None => (marker.replace('_', " ").to_uppercase(), ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn synonyms_resolve_to_canonical_markers() {
        for raw in ["FBS", "fbs", "Fasting_Blood_Sugar", "fasting blood sugar", "fasting-glucose"] {
            assert_eq!(normalize_lab_key(raw), "fasting_glucose", "{raw}");
        }
        assert_eq!(normalize_lab_key("HGB"), "hemoglobin");
        assert_eq!(normalize_lab_key("Hemoglobin A1c"), "hba1c");
        assert_eq!(normalize_lab_key("Vitamin D"), "vitamin_d");
    }

    #[test]
    fn panel_coerces_strings_and_skips_garbage() {
        let raw: LabValues = serde_json::from_value(json!({
            "HbA1c": "6.1",
            "LDL": "n/a",
            "tsh": null,
            "sbp": 128,
            "flag": true
        }))
        .expect("lab values deserialize");

        let panel = LabPanel::from_values(&raw);
        assert_eq!(panel.get("hba1c"), Some(6.1));
        assert_eq!(panel.get("systolic_bp"), Some(128.0));
        assert_eq!(panel.get("ldl"), None);
        assert_eq!(panel.get("tsh"), None);
        assert_eq!(panel.len(), 2);
    }

    #[test]
    fn first_numeric_value_wins_for_duplicate_markers() {
        let raw: LabValues = [("a1c", json!("bad")), ("hba1c", json!(7.0)), ("hemoglobin_a1c", json!(5.0))]
            .into_iter()
            .collect();
        let panel = LabPanel::from_values(&raw);
        assert_eq!(panel.get("hba1c"), Some(7.0));
    }
}
