//! Mapping from raw directory JSON to domain records.

use std::fmt;
use std::str::FromStr;

use cards_core::model::{Record, RecordDraft, RecordError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Which directory attribute acts as the record's group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GroupField {
    #[default]
    Department,
    Division,
}

impl GroupField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            GroupField::Department => "department",
            GroupField::Division => "division",
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "department" => Ok(GroupField::Department),
            "division" => Ok(GroupField::Division),
            other => Err(format!(
                "unknown group field `{other}` (expected department or division)"
            )),
        }
    }
}

/// Accepts a string or a number; anything else counts as absent.
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Non-string values count as absent.
fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

/// Wire shape of one directory entry. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    display_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    preferred_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    photo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    department: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    division: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    location: Option<String>,
}

impl RawRecord {
    fn into_draft(self, group_field: GroupField) -> RecordDraft {
        let group = match group_field {
            GroupField::Department => self.department,
            GroupField::Division => self.division,
        };
        RecordDraft {
            id: self.id,
            display_name: self.display_name,
            preferred_name: self.preferred_name,
            last_name: self.last_name,
            photo_url: self.photo_url,
            group,
            gender: self.gender,
            job_title: self.job_title,
            location: self.location,
        }
    }
}

/// Why a single raw value could not become a record.
#[derive(Debug)]
pub enum Rejected {
    Shape(String),
    Invalid(RecordError),
}

impl fmt::Display for Rejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejected::Shape(reason) => write!(f, "unexpected shape: {reason}"),
            Rejected::Invalid(err) => write!(f, "{err}"),
        }
    }
}

/// Convert one raw value into a validated record.
///
/// # Errors
///
/// Returns `Rejected` when the value is not an object of the expected shape or
/// misses a required field.
pub fn map_record(value: Value, group_field: GroupField) -> Result<Record, Rejected> {
    if !value.is_object() {
        return Err(Rejected::Shape("not an object".into()));
    }
    let raw: RawRecord =
        serde_json::from_value(value).map_err(|e| Rejected::Shape(e.to_string()))?;
    raw.into_draft(group_field)
        .validate()
        .map_err(Rejected::Invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cards_core::model::RecordId;
    use serde_json::json;

    fn bamboo_entry() -> Value {
        json!({
            "id": "133",
            "displayName": "Augusta Ada King",
            "firstName": "Augusta",
            "lastName": "Lovelace",
            "preferredName": "Ada",
            "gender": "Female",
            "jobTitle": "Analyst",
            "workEmail": "ada@example.com",
            "department": "Engineering",
            "division": "R&D",
            "location": "London",
            "photoUploaded": true,
            "photoUrl": "https://img.example.com/133.jpg"
        })
    }

    #[test]
    fn maps_directory_entry_with_department_group() {
        let record = map_record(bamboo_entry(), GroupField::Department).unwrap();

        assert_eq!(record.id(), &RecordId::new("133"));
        assert_eq!(record.group(), Some("Engineering"));
        assert_eq!(record.gender(), Some("Female"));
        assert_eq!(record.label(), "Ada Lovelace");
        assert_eq!(record.location(), Some("London"));
    }

    #[test]
    fn division_can_be_the_group() {
        let record = map_record(bamboo_entry(), GroupField::Division).unwrap();
        assert_eq!(record.group(), Some("R&D"));
    }

    #[test]
    fn numeric_ids_are_accepted() {
        let record = map_record(
            json!({ "id": 4, "displayName": "D", "photoUrl": "u" }),
            GroupField::Department,
        )
        .unwrap();
        assert_eq!(record.id(), &RecordId::from(4_u64));
    }

    #[test]
    fn null_optional_fields_are_absent() {
        let record = map_record(
            json!({
                "id": "1",
                "displayName": "D",
                "photoUrl": "u",
                "gender": null,
                "preferredName": null
            }),
            GroupField::Department,
        )
        .unwrap();
        assert_eq!(record.gender(), None);
        assert_eq!(record.preferred_name(), None);
    }

    #[test]
    fn non_objects_and_missing_fields_are_rejected() {
        assert!(matches!(
            map_record(json!(12), GroupField::Department),
            Err(Rejected::Shape(_))
        ));
        assert!(matches!(
            map_record(json!({ "id": "1", "photoUrl": "u" }), GroupField::Department),
            Err(Rejected::Invalid(RecordError::MissingDisplayName(_)))
        ));
    }

    #[test]
    fn wrong_typed_optional_fields_count_as_absent() {
        let record = map_record(
            json!({
                "id": "1",
                "displayName": "Ada",
                "photoUrl": "u",
                "gender": 1,
                "location": { "city": "London" },
                "division": 7,
                "department": "Eng"
            }),
            GroupField::Department,
        )
        .unwrap();

        assert_eq!(record.gender(), None);
        assert_eq!(record.location(), None);
        assert_eq!(record.group(), Some("Eng"));

        let record = map_record(
            json!({ "id": "2", "displayName": "Grace", "photoUrl": "u", "division": 7 }),
            GroupField::Division,
        )
        .unwrap();
        assert_eq!(record.group(), None);
    }

    #[test]
    fn wrong_typed_required_fields_are_missing() {
        let bool_id = json!({ "id": true, "displayName": "A", "photoUrl": "u" });
        assert!(matches!(
            map_record(bool_id, GroupField::Department),
            Err(Rejected::Invalid(RecordError::MissingId))
        ));

        let numeric_name = json!({ "id": "1", "displayName": 5, "photoUrl": "u" });
        assert!(matches!(
            map_record(numeric_name, GroupField::Department),
            Err(Rejected::Invalid(RecordError::MissingDisplayName(_)))
        ));
    }

    #[test]
    fn group_field_parses_case_insensitively() {
        assert_eq!("Division".parse::<GroupField>(), Ok(GroupField::Division));
        assert!("team".parse::<GroupField>().is_err());
    }
}
