//! Ordered build plans handed to an external executor

use crate::recipe::Provider;
use crate::stages::StepAction;
use forge_errors::Error;
use forge_types::{BuildStep, Platform};
use serde::Serialize;

/// One scheduled step and the actions it expands to
#[derive(Debug, Clone, Serialize)]
pub struct PlannedStep {
    pub step: BuildStep,
    pub provider: Provider,
    pub actions: Vec<StepAction>,
}

/// Complete plan for one recipe instance
#[derive(Debug, Clone, Serialize)]
pub struct BuildPlan {
    pub package_name: String,
    pub target_platform: Platform,
    /// Platform-resolved dependencies
    pub deps: Vec<String>,
    pub steps: Vec<PlannedStep>,
    /// Scheduled steps with no provider
    pub skipped: Vec<BuildStep>,
}

impl BuildPlan {
    /// Steps in execution order
    pub fn step_order(&self) -> impl Iterator<Item = BuildStep> + '_ {
        self.steps.iter().map(|planned| planned.step)
    }

    /// Every action across all steps, in execution order
    pub fn actions(&self) -> impl Iterator<Item = &StepAction> {
        self.steps.iter().flat_map(|planned| planned.actions.iter())
    }

    /// Serialize the plan for an executor
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self)
            .map_err(|e| Error::internal(format!("JSON error: {e}")))
    }
}
