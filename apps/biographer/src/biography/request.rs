//! GenerationRequest — the five key fields the biography is written from.
//!
//! Wire form: `name;breed;age;condition;requirements`. The requirements list
//! is last on purpose: parsing splits into at most five parts, so a `;` inside
//! the requirements survives. The other fields must not contain the delimiter.

use std::fmt;

use crate::biography::GenerationError;
use crate::models::animal::AnimalRecord;

pub const DELIMITER: char = ';';
const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub name: String,
    pub breed: String,
    pub age: u32,
    /// Empty when the animal has no special condition.
    pub condition: String,
    pub requirements: String,
}

impl GenerationRequest {
    /// Builds the request from a dataset record.
    pub fn from_record(record: &AnimalRecord) -> Result<Self, GenerationError> {
        for (field, value) in [
            ("name", &record.name),
            ("breed", &record.breed),
            ("special condition", &record.special_condition),
        ] {
            if value.contains(DELIMITER) {
                return Err(GenerationError::MalformedRequest(format!(
                    "{field} '{value}' of animal '{}' contains the '{DELIMITER}' delimiter",
                    record.name
                )));
            }
        }

        Ok(Self {
            name: record.name.trim().to_string(),
            breed: record.breed.trim().to_string(),
            age: record.age_years,
            condition: record.special_condition.trim().to_string(),
            requirements: record.requirement_list().join(", "),
        })
    }

    /// Parses the wire form. Fewer than five fields or an age that is not a
    /// plain decimal (digits only, no sign, no leading zero) is malformed, so
    /// the age always renders back exactly as written.
    pub fn parse(raw: &str) -> Result<Self, GenerationError> {
        let parts: Vec<&str> = raw.splitn(FIELD_COUNT, DELIMITER).collect();
        if parts.len() < FIELD_COUNT {
            return Err(GenerationError::MalformedRequest(format!(
                "expected {FIELD_COUNT} '{DELIMITER}'-separated fields (name, breed, age, condition, requirements), found {}",
                parts.len()
            )));
        }

        let age = parse_age(parts[2].trim())?;

        Ok(Self {
            name: parts[0].trim().to_string(),
            breed: parts[1].trim().to_string(),
            age,
            condition: parts[3].trim().to_string(),
            requirements: parts[4].trim().to_string(),
        })
    }

    pub fn has_condition(&self) -> bool {
        !self.condition.is_empty()
    }
}

fn parse_age(raw: &str) -> Result<u32, GenerationError> {
    let plain = !raw.is_empty()
        && raw.bytes().all(|b| b.is_ascii_digit())
        && (raw == "0" || !raw.starts_with('0'));

    plain
        .then(|| raw.parse::<u32>().ok())
        .flatten()
        .ok_or_else(|| {
            GenerationError::MalformedRequest(format!(
                "age '{raw}' is not a plain whole number of years"
            ))
        })
}

impl fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}",
            self.name,
            self.breed,
            self.age,
            self.condition,
            self.requirements,
            d = DELIMITER
        )
    }
}
