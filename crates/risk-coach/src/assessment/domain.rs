use serde::{Deserialize, Deserializer, Serialize};

use super::labs::LabValues;

/// Engine input. Every facet is optional; scorers fall back to baselines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub patient: Option<PatientProfile>,
    #[serde(default)]
    pub lifestyle: Option<Lifestyle>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub family: Vec<FamilyMember>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lab_values: LabValues,
}

/// Demographics as submitted by the intake form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientProfile {
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Height in centimetres.
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_issues: Vec<String>,
}

const DEFAULT_AGE: u32 = 30;
const DEFAULT_HEIGHT_CM: f64 = 170.0;
const DEFAULT_WEIGHT_KG: f64 = 70.0;
const FALLBACK_BMI: f64 = 22.0;

/// Demographics derived once per request and shared by every disease.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicInfo {
    pub age: u32,
    pub gender: Gender,
    pub bmi: f64,
}

impl BasicInfo {
    pub fn from_profile(profile: Option<&PatientProfile>) -> Self {
        let age = profile.and_then(|p| p.age).unwrap_or(DEFAULT_AGE);
        let gender = profile
            .and_then(|p| p.gender.clone())
            .unwrap_or(Gender::Unknown);
        let height = profile.and_then(|p| p.height).unwrap_or(DEFAULT_HEIGHT_CM);
        let weight = profile.and_then(|p| p.weight).unwrap_or(DEFAULT_WEIGHT_KG);

        Self {
            age,
            gender,
            bmi: body_mass_index(height, weight),
        }
    }
}

impl Default for BasicInfo {
    fn default() -> Self {
        Self::from_profile(None)
    }
}

/// BMI rounded to one decimal; non-positive or non-finite inputs yield 22.0.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    if !(height_cm > 0.0) || !weight_kg.is_finite() {
        return FALLBACK_BMI;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if bmi.is_finite() {
        (bmi * 10.0).round() / 10.0
    } else {
        FALLBACK_BMI
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Female,
    Male,
    Other(String),
    Unknown,
}

impl Gender {
    pub fn is_female(&self) -> bool {
        matches!(self, Gender::Female)
    }
}

impl From<String> for Gender {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "f" | "female" | "woman" => Gender::Female,
            "m" | "male" | "man" => Gender::Male,
            "" | "unknown" | "unspecified" => Gender::Unknown,
            _ => Gender::Other(value.trim().to_string()),
        }
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Female => "female".to_string(),
            Gender::Male => "male".to_string(),
            Gender::Other(raw) => raw,
            Gender::Unknown => "unknown".to_string(),
        }
    }
}

/// Self-reported habits. Absent fields resolve to the defaults exposed by the
/// accessor methods.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    #[serde(default)]
    pub smoking: Option<bool>,
    #[serde(default)]
    pub alcohol: Option<AlcoholUse>,
    #[serde(default)]
    pub exercise: Option<ExerciseLevel>,
    #[serde(default)]
    pub diet: Option<Diet>,
    #[serde(default)]
    pub stress_level: Option<StressLevel>,
    #[serde(default)]
    pub sleep_hours: Option<f64>,
}

impl Lifestyle {
    pub const EMPTY: Lifestyle = Lifestyle {
        smoking: None,
        alcohol: None,
        exercise: None,
        diet: None,
        stress_level: None,
        sleep_hours: None,
    };

    const DEFAULT_SLEEP_HOURS: f64 = 7.0;

    pub fn is_empty(&self) -> bool {
        self.smoking.is_none()
            && self.alcohol.is_none()
            && self.exercise.is_none()
            && self.diet.is_none()
            && self.stress_level.is_none()
            && self.sleep_hours.is_none()
    }

    pub fn smokes(&self) -> bool {
        self.smoking.unwrap_or(false)
    }

    pub fn alcohol(&self) -> AlcoholUse {
        self.alcohol.unwrap_or(AlcoholUse::None)
    }

    pub fn exercise(&self) -> ExerciseLevel {
        self.exercise.unwrap_or(ExerciseLevel::Regular)
    }

    pub fn diet(&self) -> Diet {
        self.diet.unwrap_or(Diet::Balanced)
    }

    pub fn stress(&self) -> StressLevel {
        self.stress_level.unwrap_or(StressLevel::Low)
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours
            .filter(|hours| hours.is_finite())
            .unwrap_or(Self::DEFAULT_SLEEP_HOURS)
    }

    pub fn sleep_deficit(&self) -> bool {
        self.sleep_hours() < 6.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlcoholUse {
    None,
    Occasional,
    Moderate,
    Frequent,
    Heavy,
    Daily,
    #[serde(other)]
    Other,
}

impl AlcoholUse {
    pub fn is_heavy(&self) -> bool {
        matches!(self, AlcoholUse::Heavy | AlcoholUse::Frequent | AlcoholUse::Daily)
    }

    pub fn is_moderate(&self) -> bool {
        matches!(self, AlcoholUse::Moderate | AlcoholUse::Occasional)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseLevel {
    None,
    Sedentary,
    Rare,
    Occasional,
    Regular,
    Active,
    #[serde(other)]
    Other,
}

impl ExerciseLevel {
    pub fn is_inactive(&self) -> bool {
        matches!(
            self,
            ExerciseLevel::Sedentary | ExerciseLevel::None | ExerciseLevel::Rare
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Diet {
    Balanced,
    HighSugar,
    #[serde(rename = "high_fat_diet", alias = "high_fat")]
    HighFat,
    HighSalt,
    Poor,
    FastFood,
    Vegetarian,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
    Severe,
    #[serde(other)]
    Other,
}

impl StressLevel {
    pub fn is_high(&self) -> bool {
        matches!(self, StressLevel::High | StressLevel::Severe)
    }
}

/// Relative with the conditions they are known to have.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    #[serde(default = "unknown_role")]
    pub role: String,
    #[serde(default)]
    pub generation: Generation,
    #[serde(default, deserialize_with = "null_as_default")]
    pub known_issues: Vec<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<Gender>,
}

fn unknown_role() -> String {
    "unknown".to_string()
}

impl FamilyMember {
    pub fn has_condition(&self, disease_id: &str) -> bool {
        self.known_issues.iter().any(|issue| issue == disease_id)
    }

    /// Role formatted for display: underscores become spaces, words are title-cased.
    pub fn role_label(&self) -> String {
        self.role
            .replace('_', " ")
            .split_whitespace()
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Proximity tier of a relative. Values outside `-1..=1` are treated as extended family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Generation {
    Children,
    Siblings,
    Parents,
    #[default]
    Extended,
}

impl Generation {
    pub fn is_first_degree(&self) -> bool {
        !matches!(self, Generation::Extended)
    }
}

impl From<i64> for Generation {
    fn from(value: i64) -> Self {
        match value {
            -1 => Generation::Children,
            0 => Generation::Siblings,
            1 => Generation::Parents,
            _ => Generation::Extended,
        }
    }
}

impl From<Generation> for i64 {
    fn from(value: Generation) -> Self {
        match value {
            Generation::Children => -1,
            Generation::Siblings => 0,
            Generation::Parents => 1,
            Generation::Extended => 2,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
