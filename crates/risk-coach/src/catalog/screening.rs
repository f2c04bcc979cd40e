use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Ordered screening tests per disease.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestTable {
    #[serde(default)]
    pub disease_tests: BTreeMap<String, Vec<ScreeningTest>>,
}

impl TestTable {
    pub fn for_disease(&self, disease_id: &str) -> &[ScreeningTest] {
        self.disease_tests
            .get(disease_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreeningTest {
    pub name: String,
    pub frequency: String,
    pub why: String,
    #[serde(default)]
    pub normal_range: Option<String>,
}
