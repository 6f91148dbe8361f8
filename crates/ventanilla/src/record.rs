//! Core record types for ventanilla.
//!
//! This module defines the single entity the system manages: an intake
//! record, either a claim ("Reclamo") or a service request ("Solicitud"),
//! carrying a server-assigned identity and a free-form set of string fields.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// The kind of intake record, fixed per collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    /// A complaint record.
    Reclamo,
    /// A service-request record.
    Solicitud,
}

impl RecordKind {
    /// The collection name used in API paths.
    #[must_use]
    pub fn collection_name(&self) -> &'static str {
        match self {
            Self::Reclamo => "reclamos",
            Self::Solicitud => "solicitudes",
        }
    }

    /// The backing file name for this kind's collection.
    #[must_use]
    pub fn file_name(&self) -> &'static str {
        match self {
            Self::Reclamo => "reclamos.json",
            Self::Solicitud => "solicitudes.json",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reclamo => write!(f, "Reclamo"),
            Self::Solicitud => write!(f, "Solicitud"),
        }
    }
}

impl FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reclamo" | "reclamos" => Ok(Self::Reclamo),
            "solicitud" | "solicitudes" => Ok(Self::Solicitud),
            other => Err(format!("unknown record kind: {other}")),
        }
    }
}

/// A single intake record.
///
/// `id`, `tipo`, and `fecha` are assigned by the store at creation; every
/// other field is a caller-supplied string and is flattened into the same
/// JSON object on disk and on the wire.
///
/// `fecha` stays a string for the record's whole lifetime. It is only parsed
/// by the filter engine, so an unparseable value never fails a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique id within the collection, derived from the creation time in
    /// Unix milliseconds. Two creations in the same millisecond collide;
    /// no retry or deduplication is attempted.
    pub id: i64,

    /// The record kind, always matching the collection it lives in.
    pub tipo: RecordKind,

    /// Creation timestamp as an ISO-8601 string.
    pub fecha: String,

    /// Free-form caller-supplied fields (account number, name, street,
    /// email, phone, comment, employee, ...). Nothing is validated.
    #[serde(flatten)]
    pub fields: BTreeMap<String, String>,
}

impl Record {
    /// Build a new record of the given kind from caller-supplied fields.
    ///
    /// Stamps the current time as both the id (milliseconds) and `fecha`
    /// (ISO-8601). Caller-supplied `id`, `tipo`, or `fecha` keys in the
    /// field map are discarded, not rejected.
    #[must_use]
    pub fn new(kind: RecordKind, mut fields: BTreeMap<String, String>) -> Self {
        let now = Utc::now();
        for key in ["id", "tipo", "fecha"] {
            fields.remove(key);
        }
        Self {
            id: now.timestamp_millis(),
            tipo: kind,
            fecha: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            fields,
        }
    }

    /// Shallow-merge a patch into this record.
    ///
    /// Every key in the patch overwrites the corresponding field; keys not
    /// in the patch are left unchanged. A record keeps its `id` and `tipo`
    /// for its lifetime, so those keys are ignored; a `fecha` key overwrites
    /// the stored timestamp like any other field.
    pub fn apply_patch(&mut self, patch: BTreeMap<String, String>) {
        for (key, value) in patch {
            match key.as_str() {
                "id" | "tipo" => {}
                "fecha" => self.fecha = value,
                _ => {
                    self.fields.insert(key, value);
                }
            }
        }
    }

    /// Look up a caller-supplied field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Case-insensitive substring search over every field value, including
    /// `id`, `tipo`, and `fecha`.
    #[must_use]
    pub fn contains_text(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.id.to_string().contains(&needle)
            || self.tipo.to_string().to_lowercase().contains(&needle)
            || self.fecha.to_lowercase().contains(&needle)
            || self
                .fields
                .values()
                .any(|value| value.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RecordKind::Reclamo.to_string(), "Reclamo");
        assert_eq!(RecordKind::Solicitud.to_string(), "Solicitud");
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("reclamo".parse::<RecordKind>(), Ok(RecordKind::Reclamo));
        assert_eq!("Solicitud".parse::<RecordKind>(), Ok(RecordKind::Solicitud));
        assert_eq!("solicitudes".parse::<RecordKind>(), Ok(RecordKind::Solicitud));
        assert!("expediente".parse::<RecordKind>().is_err());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(RecordKind::Reclamo.collection_name(), "reclamos");
        assert_eq!(RecordKind::Solicitud.collection_name(), "solicitudes");
        assert_eq!(RecordKind::Reclamo.file_name(), "reclamos.json");
        assert_eq!(RecordKind::Solicitud.file_name(), "solicitudes.json");
    }

    #[test]
    fn test_new_stamps_identity() {
        let record = Record::new(
            RecordKind::Reclamo,
            fields(&[("numeroCuenta", "1234567/001"), ("email", "a@b.com")]),
        );

        assert!(record.id > 0);
        assert_eq!(record.tipo, RecordKind::Reclamo);
        assert!(record.fecha.ends_with('Z'));
        assert_eq!(record.field("numeroCuenta"), Some("1234567/001"));
        assert_eq!(record.field("email"), Some("a@b.com"));
    }

    #[test]
    fn test_new_discards_reserved_keys() {
        let record = Record::new(
            RecordKind::Solicitud,
            fields(&[
                ("id", "99"),
                ("tipo", "Reclamo"),
                ("fecha", "1999-01-01"),
                ("telefono", "555-1234"),
            ]),
        );

        assert_ne!(record.id, 99);
        assert_eq!(record.tipo, RecordKind::Solicitud);
        assert_ne!(record.fecha, "1999-01-01");
        assert_eq!(record.field("telefono"), Some("555-1234"));
        assert!(record.field("id").is_none());
        assert!(record.field("tipo").is_none());
        assert!(record.field("fecha").is_none());
    }

    #[test]
    fn test_apply_patch_merges() {
        let mut record = Record::new(
            RecordKind::Reclamo,
            fields(&[("email", "old@example.com"), ("telefono", "555-1234")]),
        );

        record.apply_patch(fields(&[("email", "new@example.com"), ("comentario", "sin agua")]));

        assert_eq!(record.field("email"), Some("new@example.com"));
        assert_eq!(record.field("telefono"), Some("555-1234"));
        assert_eq!(record.field("comentario"), Some("sin agua"));
    }

    #[test]
    fn test_apply_patch_protects_id_and_tipo() {
        let mut record = Record::new(RecordKind::Reclamo, BTreeMap::new());
        let id = record.id;

        record.apply_patch(fields(&[("id", "1"), ("tipo", "Solicitud"), ("fecha", "2024-02-02")]));

        assert_eq!(record.id, id);
        assert_eq!(record.tipo, RecordKind::Reclamo);
        assert_eq!(record.fecha, "2024-02-02");
    }

    #[test]
    fn test_contains_text() {
        let record = Record::new(
            RecordKind::Reclamo,
            fields(&[("nombreApellido", "María García"), ("calle", "San Martín")]),
        );

        assert!(record.contains_text("garcía"));
        assert!(record.contains_text("MARTÍN"));
        assert!(record.contains_text("reclamo"));
        assert!(record.contains_text(&record.id.to_string()));
        assert!(!record.contains_text("belgrano"));
    }

    #[test]
    fn test_serialization_flattens_fields() {
        let record = Record::new(RecordKind::Solicitud, fields(&[("numeroCuenta", "1234567/001")]));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tipo"], "Solicitud");
        assert_eq!(json["numeroCuenta"], "1234567/001");
        assert!(json.get("fields").is_none());

        let roundtrip: Record = serde_json::from_value(json).unwrap();
        assert_eq!(roundtrip, record);
    }

    #[test]
    fn test_deserialization_from_wire_shape() {
        let json = r#"{
            "id": 1717236000000,
            "tipo": "Reclamo",
            "fecha": "2024-06-01T10:00:00.000Z",
            "empleado": "jperez",
            "numeroCuenta": "1234567/001"
        }"#;

        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, 1_717_236_000_000);
        assert_eq!(record.tipo, RecordKind::Reclamo);
        assert_eq!(record.fecha, "2024-06-01T10:00:00.000Z");
        assert_eq!(record.field("empleado"), Some("jperez"));
    }
}
