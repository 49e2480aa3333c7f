//! Raw catalog records and their conversion into [`ProfileSpec`].
//!
//! Missing fields are tolerated: numbers default to 0, the length to
//! 1000 mm and the standard to GB. The dimension guard absorbs the rest.

use std::collections::HashSet;

use alu_types::{ProfileSpec, Standard};
use serde::Deserialize;

use crate::errors::CatalogError;

const DEFAULT_LENGTH_MM: f64 = 1000.0;

fn default_length() -> f64 {
    DEFAULT_LENGTH_MM
}

/// `series` appears both as `"40"` and `40` in catalog files.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawSeries {
    Text(String),
    Number(serde_json::Number),
}

impl RawSeries {
    fn into_string(self) -> String {
        match self {
            RawSeries::Text(s) => s,
            RawSeries::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawSection {
    #[serde(default)]
    width: f64,
    #[serde(default)]
    height: f64,
    #[serde(default)]
    slot_width: f64,
    #[serde(default)]
    wall_thickness: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct RawProfile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    standard: Option<String>,
    #[serde(default)]
    series: Option<RawSeries>,
    #[serde(default)]
    section_params: RawSection,
    #[serde(default = "default_length")]
    default_length: f64,
}

impl RawProfile {
    fn into_spec(self) -> Result<ProfileSpec, CatalogError> {
        let standard = match self.standard.as_deref() {
            None => Standard::default(),
            Some(code) => code.parse().map_err(|_| CatalogError::UnknownStandard {
                id: self.id.clone(),
                value: code.to_string(),
            })?,
        };
        Ok(ProfileSpec {
            id: self.id,
            name: self.name,
            standard,
            series: self.series.map(RawSeries::into_string).unwrap_or_default(),
            width: self.section_params.width,
            height: self.section_params.height,
            slot_width: self.section_params.slot_width,
            wall_thickness: self.section_params.wall_thickness,
            default_length: self.default_length,
        })
    }
}

/// Parse a catalog document into profile specs, in file order.
pub fn parse_profiles(json: &str) -> Result<Vec<ProfileSpec>, CatalogError> {
    let raw: Vec<RawProfile> =
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;

    let mut seen = HashSet::new();
    let mut profiles = Vec::with_capacity(raw.len());
    for record in raw {
        let spec = record.into_spec()?;
        if !seen.insert(spec.id.clone()) {
            return Err(CatalogError::DuplicateId(spec.id));
        }
        profiles.push(spec);
    }
    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let profiles = parse_profiles(r#"[{"id": "X-1", "section_params": {"width": 20}}]"#).unwrap();
        let p = &profiles[0];

        assert_eq!(p.id, "X-1");
        assert_eq!(p.name, "");
        assert_eq!(p.standard, Standard::NationalStandard);
        assert_eq!(p.series, "");
        assert_eq!(p.width, 20.0);
        assert_eq!(p.height, 0.0);
        assert_eq!(p.slot_width, 0.0);
        assert_eq!(p.default_length, 1000.0);
    }

    #[test]
    fn numeric_series_becomes_text() {
        let profiles = parse_profiles(r#"[{"id": "A", "series": 40}, {"id": "B", "series": "45"}]"#).unwrap();
        assert_eq!(profiles[0].series, "40");
        assert_eq!(profiles[1].series, "45");
    }

    #[test]
    fn unknown_standard_is_rejected() {
        let err = parse_profiles(r#"[{"id": "A", "standard": "ISO"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownStandard { ref value, .. } if value == "ISO"));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = parse_profiles(r#"[{"id": "A"}, {"id": "A"}]"#).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(ref id) if id == "A"));
    }

    #[test]
    fn non_array_document_is_a_parse_error() {
        assert!(matches!(
            parse_profiles(r#"{"id": "A"}"#),
            Err(CatalogError::Parse(_))
        ));
    }
}
