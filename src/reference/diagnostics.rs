//! Diagnostic Rule Table
//!
//! Each symptom names the component it concerns and lists candidate
//! solutions. A solution is gated by a `LogicCheck`: either always
//! applicable, or applicable only when a capability flag is set on the
//! component. Extra solution fields (action text, explanation, ...) are kept
//! verbatim and passed through to the caller.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::ReferenceDataError;
use crate::model::{Capabilities, ComponentKind};

/// Gate deciding whether a solution applies to a component
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogicCheck {
    AlwaysTrue,
    HasAirSpring,
    HasRebound,
    HasLsc,
    HasHsc,
    HasLsr,
    HasHsr,
    TokensAdjustable,
    /// A name this build does not recognise; never applies
    Unrecognized(String),
}

impl LogicCheck {
    pub fn as_str(&self) -> &str {
        match self {
            LogicCheck::AlwaysTrue => "always_true",
            LogicCheck::HasAirSpring => "has_air_spring",
            LogicCheck::HasRebound => "has_rebound",
            LogicCheck::HasLsc => "has_lsc",
            LogicCheck::HasHsc => "has_hsc",
            LogicCheck::HasLsr => "has_lsr",
            LogicCheck::HasHsr => "has_hsr",
            LogicCheck::TokensAdjustable => "tokens_adjustable",
            LogicCheck::Unrecognized(name) => name.as_str(),
        }
    }

    /// Evaluate the gate against a component's capabilities
    pub fn applies_to(&self, caps: &Capabilities) -> bool {
        match self {
            LogicCheck::AlwaysTrue => true,
            LogicCheck::HasAirSpring => caps.has_air_spring,
            LogicCheck::HasRebound => caps.has_rebound,
            LogicCheck::HasLsc => caps.has_lsc,
            LogicCheck::HasHsc => caps.has_hsc,
            LogicCheck::HasLsr => caps.has_lsr,
            LogicCheck::HasHsr => caps.has_hsr,
            LogicCheck::TokensAdjustable => caps.tokens_adjustable,
            LogicCheck::Unrecognized(_) => false,
        }
    }
}

impl From<String> for LogicCheck {
    fn from(name: String) -> Self {
        match name.as_str() {
            "always_true" => LogicCheck::AlwaysTrue,
            "has_air_spring" => LogicCheck::HasAirSpring,
            "has_rebound" => LogicCheck::HasRebound,
            "has_lsc" => LogicCheck::HasLsc,
            "has_hsc" => LogicCheck::HasHsc,
            "has_lsr" => LogicCheck::HasLsr,
            "has_hsr" => LogicCheck::HasHsr,
            "tokens_adjustable" => LogicCheck::TokensAdjustable,
            _ => LogicCheck::Unrecognized(name),
        }
    }
}

impl From<LogicCheck> for String {
    fn from(check: LogicCheck) -> Self {
        match check {
            LogicCheck::Unrecognized(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

/// One candidate fix for a symptom
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub logic_check: LogicCheck,
    /// Lower is more urgent. Any JSON number, fractions included
    pub priority: Number,
    /// Remaining fix fields, passed through untouched
    #[serde(flatten)]
    pub details: Map<String, Value>,
}

impl Solution {
    /// Priority as a sort key
    pub fn rank(&self) -> f64 {
        self.priority.as_f64().unwrap_or(f64::INFINITY)
    }
}

/// A symptom and its candidate solutions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomRule {
    pub symptom_id: String,
    pub symptom_name: String,
    pub required_component: ComponentKind,
    #[serde(default)]
    pub solutions: Vec<Solution>,
}

/// The full rule list, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiagnosticRules {
    rules: Vec<SymptomRule>,
}

impl DiagnosticRules {
    pub fn new(rules: Vec<SymptomRule>) -> Self {
        Self { rules }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ReferenceDataError> {
        let rules: DiagnosticRules = serde_json::from_str(json)?;
        for (symptom_id, name) in rules.unrecognized_checks() {
            tracing::warn!(
                "Symptom '{}' uses unknown logic_check '{}'; that solution will never apply",
                symptom_id,
                name
            );
        }
        Ok(rules)
    }

    pub fn from_file(path: &Path) -> Result<Self, ReferenceDataError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReferenceDataError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Exact-match lookup by symptom id
    pub fn find(&self, symptom_id: &str) -> Option<&SymptomRule> {
        self.rules.iter().find(|rule| rule.symptom_id == symptom_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SymptomRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// (symptom_id, check name) for every check this build cannot evaluate
    pub fn unrecognized_checks(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.solutions.iter().filter_map(move |solution| match &solution.logic_check {
                    LogicCheck::Unrecognized(name) => Some((rule.symptom_id.as_str(), name.as_str())),
                    _ => None,
                })
            })
            .collect()
    }
}
