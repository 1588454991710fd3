use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Number of columns in one dataset row.
pub const COLUMN_COUNT: usize = 18;

/// Size bucket of an animal. The dataset uses the Spanish names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeCategory {
    Small,
    Medium,
    Large,
    Giant,
}

impl SizeCategory {
    /// Spanish label, as written in the dataset.
    pub fn label(self) -> &'static str {
        match self {
            SizeCategory::Small => "Pequeño",
            SizeCategory::Medium => "Mediano",
            SizeCategory::Large => "Grande",
            SizeCategory::Giant => "Gigante",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "pequeño" | "pequeno" | "small" => Some(SizeCategory::Small),
            "mediano" | "medium" => Some(SizeCategory::Medium),
            "grande" | "large" => Some(SizeCategory::Large),
            "gigante" | "giant" => Some(SizeCategory::Giant),
            _ => None,
        }
    }
}

impl Serialize for SizeCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for SizeCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        SizeCategory::parse(&raw).ok_or_else(|| {
            de::Error::custom(format!(
                "unknown size category '{raw}' (expected Pequeño, Mediano, Grande or Gigante)"
            ))
        })
    }
}

/// One dataset row. Field order is the column order of the file and must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRecord {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub sex: String,
    pub age_years: u32,
    #[serde(with = "decimal")]
    pub weight_kg: f64,
    pub size: SizeCategory,
    pub coat: String,
    /// Mandatory household requirements, comma-separated.
    pub suitable_with: String,
    /// Empty when the animal has no special condition.
    pub special_condition: String,
    #[serde(with = "yes_no")]
    pub dewormed: bool,
    #[serde(with = "yes_no")]
    pub sterilized: bool,
    #[serde(with = "yes_no")]
    pub microchipped: bool,
    #[serde(with = "yes_no")]
    pub vaccinated: bool,
    #[serde(with = "yes_no")]
    pub adopted: bool,
    pub character_needs: String,
    pub rescue_story: String,
    pub final_biography: String,
}

impl AnimalRecord {
    /// Household requirements as a list, blanks dropped.
    pub fn requirement_list(&self) -> Vec<&str> {
        self.suitable_with
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// `Si`/`No` booleans as used by the adoption dataset.
mod yes_no {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "Si" } else { "No" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_lowercase().as_str() {
            "si" | "sí" | "yes" | "true" | "1" => Ok(true),
            "no" | "false" | "0" => Ok(false),
            _ => Err(de::Error::custom(format!(
                "expected Si/No boolean, found '{raw}'"
            ))),
        }
    }
}

/// Weights may use a decimal comma (`24,5`). Always written with a dot.
/// `NaN` and infinities are rejected.
mod decimal {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|w| w.is_finite())
            .ok_or_else(|| de::Error::custom(format!("expected a decimal weight, found '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_size_category_accepts_spanish_and_english() {
        assert_eq!(SizeCategory::parse("Pequeño"), Some(SizeCategory::Small));
        assert_eq!(SizeCategory::parse("GRANDE"), Some(SizeCategory::Large));
        assert_eq!(SizeCategory::parse(" giant "), Some(SizeCategory::Giant));
        assert_eq!(SizeCategory::parse("enorme"), None);
    }

    #[test]
    fn test_requirement_list_trims_and_drops_blanks() {
        let record = AnimalRecord {
            name: "Luna".to_string(),
            species: "Perro".to_string(),
            breed: "Labrador".to_string(),
            sex: "Hembra".to_string(),
            age_years: 3,
            weight_kg: 24.5,
            size: SizeCategory::Large,
            coat: "Dorado".to_string(),
            suitable_with: "Sin niños pequeños, , Con jardín".to_string(),
            special_condition: String::new(),
            dewormed: true,
            sterilized: true,
            microchipped: false,
            vaccinated: true,
            adopted: false,
            character_needs: String::new(),
            rescue_story: String::new(),
            final_biography: String::new(),
        };

        assert_eq!(
            record.requirement_list(),
            vec!["Sin niños pequeños", "Con jardín"]
        );
    }
}
