//! Bill of materials over the tags of generated profiles.

use std::collections::BTreeMap;

use alu_types::{keys, ProfileTags, TagValue};
use serde::{Deserialize, Serialize};

/// Aggregate for one profile type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomLine {
    pub profile_id: String,
    /// Display name (`alu_type`), empty if untagged.
    pub name: String,
    pub count: usize,
    pub total_length_mm: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillOfMaterials {
    /// One line per profile id, sorted by id.
    pub lines: Vec<BomLine>,
    pub total_count: usize,
    pub total_length_mm: f64,
}

/// Usable length of a tag value; text is parsed as a number.
fn length_mm(value: &TagValue) -> Option<f64> {
    let parsed = match value {
        TagValue::Number(n) => Some(*n),
        TagValue::Text(s) => s.trim().parse::<f64>().ok(),
    };
    parsed.filter(|n| n.is_finite())
}

/// Count every tag set that carries a `length`; others are skipped.
/// Lengths that are not finite numbers count the piece but add no length.
pub fn bill_of_materials<'a>(tag_sets: impl IntoIterator<Item = &'a ProfileTags>) -> BillOfMaterials {
    let mut lines: BTreeMap<String, BomLine> = BTreeMap::new();
    let mut bom = BillOfMaterials::default();

    for tags in tag_sets {
        let Some(length) = tags.get(keys::LENGTH) else {
            continue;
        };
        let length = length_mm(length).unwrap_or(0.0);
        let id = tags
            .text(keys::PROFILE_ID)
            .or_else(|| tags.text(keys::ALU_TYPE))
            .unwrap_or("unknown")
            .to_string();

        let line = lines.entry(id.clone()).or_insert_with(|| BomLine {
            profile_id: id,
            name: tags.text(keys::ALU_TYPE).unwrap_or_default().to_string(),
            count: 0,
            total_length_mm: 0.0,
        });
        line.count += 1;
        line.total_length_mm += length;

        bom.total_count += 1;
        bom.total_length_mm += length;
    }

    bom.lines = lines.into_values().collect();
    bom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(id: &str, name: &str, length: impl Into<TagValue>) -> ProfileTags {
        let mut t = ProfileTags::new();
        t.insert(keys::PROFILE_ID, id);
        t.insert(keys::ALU_TYPE, name);
        t.insert(keys::LENGTH, length);
        t
    }

    #[test]
    fn groups_by_profile_id() {
        let sets = vec![
            tags("GB-4040", "4040", 1000.0),
            tags("EN-2020", "2020", 250.0),
            tags("GB-4040", "4040", 500.0),
        ];
        let bom = bill_of_materials(&sets);

        assert_eq!(bom.total_count, 3);
        assert_eq!(bom.total_length_mm, 1750.0);
        assert_eq!(bom.lines.len(), 2);
        assert_eq!(bom.lines[0].profile_id, "EN-2020");
        assert_eq!(bom.lines[1].profile_id, "GB-4040");
        assert_eq!(bom.lines[1].count, 2);
        assert_eq!(bom.lines[1].total_length_mm, 1500.0);
        assert_eq!(bom.lines[1].name, "4040");
    }

    #[test]
    fn untagged_objects_are_skipped() {
        let mut no_length = ProfileTags::new();
        no_length.insert(keys::PROFILE_ID, "GB-2020");
        let sets = vec![no_length, ProfileTags::new()];
        let bom = bill_of_materials(&sets);

        assert_eq!(bom.total_count, 0);
        assert!(bom.lines.is_empty());
    }

    #[test]
    fn bad_lengths_count_without_length() {
        let sets = vec![
            tags("GB-3030", "3030", "n/a"),
            tags("GB-3030", "3030", f64::NAN),
            tags("GB-3030", "3030", " 300 "),
        ];
        let bom = bill_of_materials(&sets);

        assert_eq!(bom.total_count, 3);
        assert_eq!(bom.total_length_mm, 300.0);
        assert_eq!(bom.lines[0].count, 3);
    }
}
