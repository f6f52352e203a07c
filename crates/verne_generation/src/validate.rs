//! Selection vetting against the declared parameter catalog.

use std::collections::BTreeMap;
use tracing::{instrument, warn};
use verne_core::ParameterSelections;
use verne_error::VerneResult;
use verne_interface::ParameterSource;

/// Outcome of vetting submitted selections.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredSelections {
    /// Selections that matched a declared parameter and type-checked.
    pub accepted: ParameterSelections,
    /// Rejected parameter ids, keyed by category.
    pub dropped: BTreeMap<String, Vec<String>>,
}

impl FilteredSelections {
    /// Number of rejected selections across all categories.
    pub fn dropped_count(&self) -> usize {
        self.dropped.values().map(Vec::len).sum()
    }
}

/// Vet submitted selections against the catalog.
///
/// Unknown categories, unknown parameter ids, and ill-typed or
/// out-of-range values are dropped with a warning rather than failing
/// the request; everything that checks out passes through unchanged.
/// Catalog lookup failures propagate.
#[instrument(skip(source, selections), fields(categories = selections.len()))]
pub async fn filter_selections(
    source: &dyn ParameterSource,
    selections: &ParameterSelections,
) -> VerneResult<FilteredSelections> {
    let mut filtered = FilteredSelections::default();

    for (category_id, params) in selections {
        let Some(definitions) = source.category_parameters(category_id).await? else {
            warn!(category = %category_id, "Dropping selections for unknown category");
            filtered
                .dropped
                .entry(category_id.clone())
                .or_default()
                .extend(params.keys().cloned());
            continue;
        };

        let mut accepted = BTreeMap::new();
        for (param_id, value) in params {
            match definitions.iter().find(|d| d.id == *param_id) {
                Some(definition) if definition.kind.accepts(value) => {
                    accepted.insert(param_id.clone(), value.clone());
                }
                Some(_) => {
                    warn!(
                        category = %category_id,
                        parameter = %param_id,
                        "Dropping ill-typed or out-of-range selection"
                    );
                    filtered
                        .dropped
                        .entry(category_id.clone())
                        .or_default()
                        .push(param_id.clone());
                }
                None => {
                    warn!(
                        category = %category_id,
                        parameter = %param_id,
                        "Dropping selection for undeclared parameter"
                    );
                    filtered
                        .dropped
                        .entry(category_id.clone())
                        .or_default()
                        .push(param_id.clone());
                }
            }
        }
        if !accepted.is_empty() {
            filtered.accepted.insert(category_id.clone(), accepted);
        }
    }

    Ok(filtered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticParameterSource;
    use serde_json::json;
    use verne_core::{ParameterDefinition, ParameterKind};

    fn catalog() -> StaticParameterSource {
        StaticParameterSource::new().with_category(
            "science-fiction",
            vec![
                ParameterDefinition {
                    id: "tech-level".to_string(),
                    name: "Tech level".to_string(),
                    kind: ParameterKind::Select {
                        options: vec!["Standard".to_string(), "Advanced".to_string()],
                    },
                },
                ParameterDefinition {
                    id: "themes".to_string(),
                    name: "Themes".to_string(),
                    kind: ParameterKind::MultiSelect {
                        options: vec!["first-contact".to_string(), "ruins".to_string()],
                    },
                },
                ParameterDefinition {
                    id: "year".to_string(),
                    name: "Year".to_string(),
                    kind: ParameterKind::Range {
                        min: 1000.0,
                        max: 9999.0,
                        step: 1.0,
                    },
                },
                ParameterDefinition {
                    id: "aliens".to_string(),
                    name: "Aliens".to_string(),
                    kind: ParameterKind::Toggle,
                },
            ],
        )
    }

    fn selections(value: serde_json::Value) -> ParameterSelections {
        serde_json::from_value(value).expect("valid selections")
    }

    #[tokio::test]
    async fn well_typed_selections_pass_through() {
        let submitted = selections(json!({
            "science-fiction": {
                "tech-level": "Advanced",
                "themes": ["ruins"],
                "year": 2150,
                "aliens": true
            }
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert_eq!(filtered.accepted, submitted);
        assert_eq!(filtered.dropped_count(), 0);
    }

    #[tokio::test]
    async fn ill_typed_values_drop() {
        let submitted = selections(json!({
            "science-fiction": {"tech-level": 3, "year": 2150}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert!(filtered.accepted["science-fiction"].contains_key("year"));
        assert!(!filtered.accepted["science-fiction"].contains_key("tech-level"));
        assert_eq!(filtered.dropped["science-fiction"], vec!["tech-level"]);
    }

    #[tokio::test]
    async fn out_of_enumeration_values_drop() {
        let submitted = selections(json!({
            "science-fiction": {"tech-level": "Magical", "themes": ["dragons"]}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert!(filtered.accepted.is_empty());
        assert_eq!(filtered.dropped_count(), 2);
    }

    #[tokio::test]
    async fn range_bounds_are_inclusive() {
        let submitted = selections(json!({
            "science-fiction": {"year": 9999}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert_eq!(filtered.dropped_count(), 0);

        let over = selections(json!({"science-fiction": {"year": 10000}}));
        let filtered = filter_selections(&catalog(), &over).await.unwrap();
        assert_eq!(filtered.dropped_count(), 1);
    }

    #[tokio::test]
    async fn unknown_category_drops_all_its_selections() {
        let submitted = selections(json!({
            "cooking": {"cuisine": "Martian", "spice": "high"}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert!(filtered.accepted.is_empty());
        assert_eq!(filtered.dropped["cooking"], vec!["cuisine", "spice"]);
    }

    #[tokio::test]
    async fn undeclared_parameter_drops() {
        let submitted = selections(json!({
            "science-fiction": {"gravity": "low"}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert!(filtered.accepted.is_empty());
        assert_eq!(filtered.dropped["science-fiction"], vec!["gravity"]);
    }

    #[tokio::test]
    async fn null_selections_drop() {
        let submitted = selections(json!({
            "science-fiction": {"tech-level": null}
        }));
        let filtered = filter_selections(&catalog(), &submitted).await.unwrap();
        assert!(filtered.accepted.is_empty());
        assert_eq!(filtered.dropped_count(), 1);
    }
}
