//! The extraction schema: the typed contract every provider's output
//! must conform to.
//!
//! Every field defaults to absent. Absence means "not found in the
//! source document" and stays distinguishable from "found to be empty":
//! serialization omits absent fields entirely, and deserializing the
//! persisted form yields the same set of present fields (round-trip
//! law). Instances are built once per successful provider response and
//! never mutated afterwards.

/// JSON-schema descriptor generation for provider requests.
pub mod descriptor;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Degree of exploration underlying the reserve verification.
///
/// Closed set: any other literal in provider output is a schema
/// violation, not a pass-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExplorationStage {
    /// Reconnaissance-level survey.
    Reconnaissance,
    /// Detailed survey.
    DetailedSurvey,
    /// Full exploration.
    Exploration,
}

/// Legal class of the mineral rights. Closed set, as above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum RightsType {
    /// Right to prospect for minerals.
    ProspectingRight,
    /// Right to mine.
    MiningRight,
}

/// Identifying information about the report document itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportMetadata {
    /// Full title of the report.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Organization that prepared the report (not the commissioning
    /// party).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_by: Option<String>,
    /// Date the report was prepared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prepared_on: Option<String>,
}

/// Mineral-rights particulars for the surveyed property.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RightsInfo {
    /// Name of the rights holding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Geographic location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Exploration stage of this verification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exploration_stage: Option<ExplorationStage>,
    /// Legal class of the rights.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights_type: Option<RightsType>,
    /// Official registration number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    /// Start of the rights' validity period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    /// End of the rights' validity period.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
    /// Annual production capacity (mining rights only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_capacity: Option<String>,
    /// Total area of the mining district.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Elevation of the mining district.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevation: Option<String>,
    /// Summary of prior geological work.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prior_exploration: Option<String>,
}

/// Quantified figures for one resource tier.
///
/// Each field is an opaque magnitude-plus-unit string ("1.2 Mt",
/// "2.7 g/t"); no numeric parsing is attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceQuantityDetail {
    /// Ore tonnage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ore_tonnage: Option<String>,
    /// Contained-metal quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_content: Option<String>,
    /// Grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// Resource figures split by certainty tier.
///
/// The total is provider-computed and deliberately kept distinct from
/// the three classified tiers; this system never recomputes or
/// reconciles it, so downstream consumers can detect mismatches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceCategory {
    /// Inferred resources (code 333).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inferred: Option<ResourceQuantityDetail>,
    /// Indicated resources (code 332).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicated: Option<ResourceQuantityDetail>,
    /// Measured resources (codes 331, 111, 122b and similar).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measured: Option<ResourceQuantityDetail>,
    /// Provider-computed sum of the classified tiers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<ResourceQuantityDetail>,
}

/// Resource figures for one commodity, primary or co-product.
///
/// Multiple commodities in one report are independent entries in an
/// ordered list, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceInfo {
    /// Commodity name in full form ("gold ore", not "gold").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commodity: Option<String>,
    /// Tiered resource figures for this commodity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantities: Option<ResourceCategory>,
}

/// Geometry and figures for one ore body (extended schema variant).
///
/// Each field is independently optional; absence must never be read
/// as zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OreBodyGeometry {
    /// Ore-body identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Ore-body name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Length.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    /// Width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    /// Thickness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<String>,
    /// Strike.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strike: Option<String>,
    /// Dip angle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dip: Option<String>,
    /// Area.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Volume.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<String>,
    /// Contained metal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal_content: Option<String>,
    /// Ore tonnage.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ore_tonnage: Option<String>,
    /// Grade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
}

/// The complete extraction result for one mining feasibility report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MiningReport {
    /// Report metadata block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<ReportMetadata>,
    /// Mineral-rights block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<RightsInfo>,
    /// One entry per commodity, in document order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<ResourceInfo>>,
    /// Per-ore-body geometry, when the report describes it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ore_bodies: Option<Vec<OreBodyGeometry>>,
    /// Free-text notable information outside the structured fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_notes: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_report() -> MiningReport {
        MiningReport {
            report: Some(ReportMetadata {
                title: Some("Reserve Verification, Xishan Gold Mine".to_string()),
                prepared_by: Some("No. 3 Geological Brigade".to_string()),
                prepared_on: None,
            }),
            rights: Some(RightsInfo {
                name: Some("Xishan Mining Area".to_string()),
                exploration_stage: Some(ExplorationStage::DetailedSurvey),
                rights_type: Some(RightsType::MiningRight),
                production_capacity: Some("500 kt/a".to_string()),
                ..RightsInfo::default()
            }),
            resources: Some(vec![ResourceInfo {
                commodity: Some("gold ore".to_string()),
                quantities: Some(ResourceCategory {
                    inferred: Some(ResourceQuantityDetail {
                        ore_tonnage: Some("1.2 Mt".to_string()),
                        metal_content: Some("3600 kg".to_string()),
                        grade: Some("3.0 g/t".to_string()),
                    }),
                    total: Some(ResourceQuantityDetail {
                        ore_tonnage: Some("1.2 Mt".to_string()),
                        metal_content: Some("3600 kg".to_string()),
                        grade: Some("3.0 g/t".to_string()),
                    }),
                    ..ResourceCategory::default()
                }),
            }]),
            ore_bodies: None,
            other_notes: None,
        }
    }

    #[test]
    fn round_trip_preserves_present_fields_and_omits_absent_ones() {
        let report = sample_report();
        let json = serde_json::to_value(&report).unwrap();

        // Absent fields must be omitted, not serialized as null.
        assert!(json.get("ore_bodies").is_none());
        assert!(json.get("other_notes").is_none());
        assert!(json["report"].get("prepared_on").is_none());
        assert!(json["rights"].get("location").is_none());

        let back: MiningReport = serde_json::from_value(json).unwrap();
        assert_eq!(back, report, "round trip must be lossless");
    }

    #[test]
    fn absent_stays_distinct_from_empty() {
        let with_empty = MiningReport {
            other_notes: Some(String::new()),
            ..MiningReport::default()
        };
        let json = serde_json::to_value(&with_empty).unwrap();
        assert_eq!(json["other_notes"], "");

        let absent = MiningReport::default();
        assert!(serde_json::to_value(&absent)
            .unwrap()
            .get("other_notes")
            .is_none());
    }

    #[test]
    fn enum_fields_serialize_as_kebab_case_literals() {
        assert_eq!(
            serde_json::to_string(&ExplorationStage::DetailedSurvey).unwrap(),
            "\"detailed-survey\""
        );
        assert_eq!(
            serde_json::to_string(&RightsType::ProspectingRight).unwrap(),
            "\"prospecting-right\""
        );
    }

    #[test]
    fn invalid_rights_type_literal_fails_deserialization() {
        let result = serde_json::from_value::<RightsInfo>(serde_json::json!({
            "rights_type": "other"
        }));
        assert!(result.is_err(), "\"other\" must not pass validation");

        let result = serde_json::from_value::<RightsInfo>(serde_json::json!({
            "exploration_stage": "drilling"
        }));
        assert!(result.is_err(), "unknown stage must not pass validation");
    }

    #[test]
    fn null_enum_values_deserialize_as_absent() {
        let rights: RightsInfo = serde_json::from_value(serde_json::json!({
            "rights_type": null,
            "exploration_stage": null
        }))
        .unwrap();
        assert!(rights.rights_type.is_none());
        assert!(rights.exploration_stage.is_none());
    }

    #[test]
    fn co_product_commodities_stay_independent_entries() {
        let report: MiningReport = serde_json::from_value(serde_json::json!({
            "resources": [
                {"commodity": "gold ore", "quantities": {"total": {"ore_tonnage": "1.2 Mt"}}},
                {"commodity": "silver ore", "quantities": {"total": {"metal_content": "48 t"}}}
            ]
        }))
        .unwrap();

        let resources = report.resources.unwrap();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].commodity.as_deref(), Some("gold ore"));
        assert_eq!(resources[1].commodity.as_deref(), Some("silver ore"));
        // Each entry carries its own category tree.
        assert!(resources[0].quantities.as_ref().unwrap().total.is_some());
        assert!(resources[1]
            .quantities
            .as_ref()
            .unwrap()
            .total
            .as_ref()
            .unwrap()
            .ore_tonnage
            .is_none());
    }

    #[test]
    fn classified_tiers_and_total_are_kept_distinct() {
        let report = sample_report();
        let category = report.resources.unwrap()[0].quantities.clone().unwrap();
        assert!(category.inferred.is_some());
        assert!(category.indicated.is_none());
        assert!(category.measured.is_none());
        assert!(category.total.is_some());
    }
}
