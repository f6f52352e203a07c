//! User parameter selections and their definitions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Selections keyed by category identifier, then parameter identifier.
///
/// The map is ordered so prompt assembly and serialization are
/// deterministic for a given set of selections.
pub type ParameterSelections = BTreeMap<String, BTreeMap<String, ParameterValue>>;

/// A single selected parameter value.
///
/// The wire shape is untagged: booleans, numbers, strings, and string
/// arrays deserialize directly into their variants.
///
/// # Examples
///
/// ```
/// use verne_core::ParameterValue;
///
/// let value: ParameterValue = serde_json::from_str("[\"alien\",\"ruins\"]").unwrap();
/// assert_eq!(value, ParameterValue::List(vec!["alien".into(), "ruins".into()]));
/// assert_eq!(value.to_string(), "alien, ruins");
///
/// let flag: ParameterValue = serde_json::from_str("true").unwrap();
/// assert_eq!(flag.to_string(), "Yes");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    /// Toggle selection.
    Bool(bool),
    /// Numeric selection, e.g. from a range slider.
    Number(f64),
    /// Single choice from an enumerated set.
    Text(String),
    /// Multiple choices from an enumerated set.
    List(Vec<String>),
    /// An explicit JSON null; never accepted by any parameter kind.
    Null,
}

impl std::fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterValue::Bool(true) => write!(f, "Yes"),
            ParameterValue::Bool(false) => write!(f, "No"),
            ParameterValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            ParameterValue::Text(s) => write!(f, "{}", s),
            ParameterValue::List(items) => write!(f, "{}", items.join(", ")),
            ParameterValue::Null => Ok(()),
        }
    }
}

impl ParameterValue {
    /// Borrow the inner string for text selections.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParameterValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether this is the explicit null selection.
    pub fn is_null(&self) -> bool {
        matches!(self, ParameterValue::Null)
    }
}

/// Declared shape of a parameter, used to vet incoming selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ParameterKind {
    /// Single choice from a fixed option list.
    Select {
        /// Accepted option values.
        options: Vec<String>,
    },
    /// Any subset of a fixed option list.
    MultiSelect {
        /// Accepted option values.
        options: Vec<String>,
    },
    /// A numeric value within an inclusive range.
    Range {
        /// Lower bound, inclusive.
        min: f64,
        /// Upper bound, inclusive.
        max: f64,
        /// Suggested increment; informational, not enforced.
        step: f64,
    },
    /// On/off switch.
    Toggle,
}

impl ParameterKind {
    /// Whether `value` is a well-typed, in-range selection for this kind.
    ///
    /// # Examples
    ///
    /// ```
    /// use verne_core::{ParameterKind, ParameterValue};
    ///
    /// let kind = ParameterKind::Range { min: 1000.0, max: 9999.0, step: 1.0 };
    /// assert!(kind.accepts(&ParameterValue::Number(2150.0)));
    /// assert!(!kind.accepts(&ParameterValue::Number(400.0)));
    /// assert!(!kind.accepts(&ParameterValue::Text("2150".to_string())));
    /// ```
    pub fn accepts(&self, value: &ParameterValue) -> bool {
        match (self, value) {
            (ParameterKind::Select { options }, ParameterValue::Text(s)) => {
                options.iter().any(|o| o == s)
            }
            (ParameterKind::MultiSelect { options }, ParameterValue::List(items)) => {
                !items.is_empty() && items.iter().all(|i| options.iter().any(|o| o == i))
            }
            (ParameterKind::Range { min, max, .. }, ParameterValue::Number(n)) => {
                n.is_finite() && *n >= *min && *n <= *max
            }
            (ParameterKind::Toggle, ParameterValue::Bool(_)) => true,
            _ => false,
        }
    }
}

/// A parameter declaration served by a parameter source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    /// Stable identifier, referenced by selections.
    pub id: String,
    /// Human-readable name for prompts and UIs.
    pub name: String,
    /// Value shape and constraints.
    pub kind: ParameterKind,
}

impl ParameterDefinition {
    /// Create a definition.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}
