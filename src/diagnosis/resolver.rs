//! Diagnostic Resolver
//!
//! Symptom id → ranked fixes. Find the symptom, resolve the component it
//! concerns, keep the solutions whose gate passes on that component, and
//! rank them by priority (stable, so equal priorities keep file order).
//! Every miss is a reported outcome, never an error.

use serde::Serialize;

use crate::model::{BikeSetup, ComponentKind};
use crate::reference::{DiagnosticRules, Solution};

/// Outcome of a diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DiagnosisResult {
    /// At least one solution applies
    Resolved {
        symptom: String,
        primary_fix: Solution,
        secondary_fix: Option<Solution>,
    },
    /// No rule with this symptom id
    SymptomUnknown { symptom_id: String },
    /// The symptom concerns a component the bike does not have
    ComponentMissing {
        symptom: String,
        component: ComponentKind,
    },
    /// The symptom is known but none of its solutions fit this component
    NoApplicableFix { symptom: String, message: String },
}

impl DiagnosisResult {
    pub fn is_resolved(&self) -> bool {
        matches!(self, DiagnosisResult::Resolved { .. })
    }
}

pub const NO_FIX_MESSAGE: &str = "No fix available for this setup, consult a suspension service.";

/// Diagnose a symptom against a bike setup
pub fn diagnose(setup: &BikeSetup, symptom_id: &str, rules: &DiagnosticRules) -> DiagnosisResult {
    let Some(rule) = rules.find(symptom_id) else {
        tracing::debug!("Unknown symptom '{}'", symptom_id);
        return DiagnosisResult::SymptomUnknown {
            symptom_id: symptom_id.to_string(),
        };
    };

    let Some(component) = setup.component(rule.required_component) else {
        return DiagnosisResult::ComponentMissing {
            symptom: rule.symptom_name.clone(),
            component: rule.required_component,
        };
    };

    let caps = component.capabilities();
    let mut applicable: Vec<&Solution> = rule
        .solutions
        .iter()
        .filter(|solution| solution.logic_check.applies_to(caps))
        .collect();
    applicable.sort_by(|a, b| a.rank().total_cmp(&b.rank()));

    tracing::debug!(
        "Symptom '{}': {} of {} solutions apply",
        symptom_id,
        applicable.len(),
        rule.solutions.len()
    );

    let mut ranked = applicable.into_iter();
    match ranked.next() {
        Some(primary) => DiagnosisResult::Resolved {
            symptom: rule.symptom_name.clone(),
            primary_fix: primary.clone(),
            secondary_fix: ranked.next().cloned(),
        },
        None => DiagnosisResult::NoApplicableFix {
            symptom: rule.symptom_name.clone(),
            message: NO_FIX_MESSAGE.to_string(),
        },
    }
}
