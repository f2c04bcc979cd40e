use std::fmt;
use std::io::Write;

use serde::Serialize;

use crate::assessment::DiseaseRiskResult;

const LIST_SEPARATOR: &str = "; ";

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(err) => write!(f, "failed to write risk export: {}", err),
            ExportError::Csv(err) => write!(f, "failed to encode risk export as CSV: {}", err),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Io(err) => Some(err),
            ExportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Flat summary of one result; list fields are joined into a single cell.
#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    disease_id: &'a str,
    disease_name: &'a str,
    probability: f64,
    risk_class: &'static str,
    consult: &'static str,
    family_score: f64,
    lifestyle_score: f64,
    lab_score: f64,
    reasons: String,
    recommended_tests: String,
}

impl<'a> From<&'a DiseaseRiskResult> for ResultRow<'a> {
    fn from(result: &'a DiseaseRiskResult) -> Self {
        Self {
            disease_id: &result.disease_id,
            disease_name: &result.disease_name,
            probability: result.probability,
            risk_class: result.risk_class.as_str(),
            consult: result.consult.as_str(),
            family_score: result.components.family,
            lifestyle_score: result.components.lifestyle,
            lab_score: result.components.lab,
            reasons: result.reasons.join(LIST_SEPARATOR),
            recommended_tests: result.recommended_tests.join(LIST_SEPARATOR),
        }
    }
}

/// Write one CSV row per result, in the order given, preceded by a header.
pub fn write_results<W: Write>(writer: W, results: &[DiseaseRiskResult]) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(ResultRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{RiskEngine, UserData};
    use crate::config::CatalogConfig;
    use serde_json::json;

    #[test]
    fn writes_header_and_one_row_per_result() {
        let engine = RiskEngine::from_config(&CatalogConfig::default()).expect("bundled catalog");
        let user: UserData = serde_json::from_value(json!({
            "patient": { "age": 52, "gender": "male", "height": 172, "weight": 90 },
            "lab_values": { "hba1c": 7.2 }
        }))
        .expect("user data parses");
        let results = engine.predict(&user);

        let mut buffer = Vec::new();
        write_results(&mut buffer, &results).expect("export succeeds");
        let text = String::from_utf8(buffer).expect("utf-8 output");

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().expect("header row").clone();
        assert_eq!(&headers[0], "disease_id");
        assert_eq!(&headers[3], "risk_class");

        let rows: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("rows parse");
        assert_eq!(rows.len(), results.len());
        assert_eq!(&rows[0][0], results[0].disease_id.as_str());
        assert_eq!(&rows[0][4], results[0].consult.as_str());
        assert!(rows[0][8].contains("HbA1c elevated at 7.2%"));
    }

    #[test]
    fn empty_results_write_nothing() {
        let mut buffer = Vec::new();
        write_results(&mut buffer, &[]).expect("export succeeds");
        assert!(buffer.is_empty());
    }
}
