//! Per-instance build step pipeline

use forge_types::BuildStep;

/// Ordered set of steps one recipe instance will run
///
/// Every instance starts from a value copy of its recipe type's template;
/// nothing here can reach back into the template. Steps can only be
/// removed, never re-added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSet {
    steps: Vec<BuildStep>,
}

impl StepSet {
    /// Copy a template sequence
    #[must_use]
    pub fn from_template(template: &[BuildStep]) -> Self {
        Self {
            steps: template.to_vec(),
        }
    }

    #[must_use]
    pub fn as_slice(&self) -> &[BuildStep] {
        &self.steps
    }

    #[must_use]
    pub fn contains(&self, step: BuildStep) -> bool {
        self.steps.contains(&step)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = BuildStep> + '_ {
        self.steps.iter().copied()
    }

    /// Remove every listed step that is present; absent ones are ignored
    ///
    /// Returns the steps actually removed, in pipeline order.
    pub fn remove(&mut self, steps: &[BuildStep]) -> Vec<BuildStep> {
        let mut removed = Vec::new();
        self.steps.retain(|step| {
            if steps.contains(step) {
                removed.push(*step);
                false
            } else {
                true
            }
        });
        removed
    }

    /// Remove steps by name; names that are not build steps are ignored
    pub fn remove_named<S: AsRef<str>>(&mut self, names: &[S]) -> Vec<BuildStep> {
        let steps: Vec<BuildStep> = names
            .iter()
            .filter_map(|name| match name.as_ref().parse::<BuildStep>() {
                Ok(step) => Some(step),
                Err(_) => {
                    tracing::debug!(name = name.as_ref(), "ignoring unknown step name");
                    None
                }
            })
            .collect();
        self.remove(&steps)
    }
}

impl Default for StepSet {
    fn default() -> Self {
        Self::from_template(&BuildStep::DEFAULT_SEQUENCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_any_order() {
        let mut steps = StepSet::default();
        let removed = steps.remove(&[BuildStep::Install, BuildStep::Fetch]);
        assert_eq!(removed, [BuildStep::Fetch, BuildStep::Install]);
        assert_eq!(
            steps.as_slice(),
            [
                BuildStep::Extract,
                BuildStep::Configure,
                BuildStep::Compile,
                BuildStep::PostInstall
            ]
        );
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut steps = StepSet::default();
        steps.remove(&[BuildStep::Fetch]);
        let removed = steps.remove(&[BuildStep::Fetch]);
        assert!(removed.is_empty());
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_remove_named_ignores_unknown() {
        let mut steps = StepSet::default();
        assert!(steps.remove_named(&["donotexist"]).is_empty());
        assert_eq!(steps.len(), BuildStep::DEFAULT_SEQUENCE.len());
        assert_eq!(steps.remove_named(&["fetch", "bogus"]), [BuildStep::Fetch]);
        assert!(!steps.contains(BuildStep::Fetch));
    }

    #[test]
    fn test_copy_is_independent_of_template() {
        let template = BuildStep::DEFAULT_SEQUENCE.to_vec();
        let mut first = StepSet::from_template(&template);
        first.remove(&[BuildStep::Compile]);
        let second = StepSet::from_template(&template);
        assert!(second.contains(BuildStep::Compile));
        assert_eq!(template.len(), 6);
    }
}
