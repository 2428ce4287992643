//! Platform-conditional attribute resolution
//!
//! Recipes declare a base value for an attribute plus optional
//! per-platform additions. Which additions apply is decided by a
//! [`PlatformGate`]: overrides are only consulted when the recipe
//! instance's platform matches the build's target platform.

use forge_types::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-platform values for one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlatformOverrides<T>(BTreeMap<Platform, Vec<T>>);

impl<T> PlatformOverrides<T> {
    /// Create an empty override table
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Add values for `platform`, appending to any already present
    pub fn insert(&mut self, platform: Platform, values: impl IntoIterator<Item = T>) {
        self.0.entry(platform).or_default().extend(values);
    }

    /// Values declared for `platform`
    #[must_use]
    pub fn get(&self, platform: Platform) -> Option<&[T]> {
        self.0.get(&platform).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Platforms with an entry
    pub fn platforms(&self) -> impl Iterator<Item = Platform> + '_ {
        self.0.keys().copied()
    }
}

impl<T> Default for PlatformOverrides<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(Platform, Vec<T>)> for PlatformOverrides<T> {
    fn from_iter<I: IntoIterator<Item = (Platform, Vec<T>)>>(iter: I) -> Self {
        let mut overrides = Self::new();
        for (platform, values) in iter {
            overrides.insert(platform, values);
        }
        overrides
    }
}

/// Decides whether platform overrides apply to a recipe instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformGate {
    /// Platform the instance is pinned to; `None` follows the target
    pub instance: Option<Platform>,
    /// Platform the build targets
    pub target: Platform,
}

impl PlatformGate {
    #[must_use]
    pub fn new(instance: Option<Platform>, target: Platform) -> Self {
        Self { instance, target }
    }

    /// Whether overrides for the target platform may be applied at all
    #[must_use]
    pub fn is_open(self) -> bool {
        self.instance.is_none_or(|platform| platform == self.target)
    }

    /// The override entry for the target platform, if the gate is open
    #[must_use]
    pub fn select<T>(self, overrides: &PlatformOverrides<T>) -> Option<&[T]> {
        if !self.is_open() {
            if overrides.get(self.target).is_some() {
                tracing::trace!(
                    target_platform = %self.target,
                    instance_platform = ?self.instance,
                    "platform override gated off"
                );
            }
            return None;
        }
        overrides.get(self.target)
    }

    /// Base values followed by the target platform's additions
    ///
    /// Order is preserved and duplicates are kept.
    #[must_use]
    pub fn concat<T: Clone>(self, base: &[T], overrides: &PlatformOverrides<T>) -> Vec<T> {
        let mut resolved = base.to_vec();
        if let Some(extra) = self.select(overrides) {
            resolved.extend_from_slice(extra);
        }
        resolved
    }

    /// The target platform's values in place of the base, when present
    #[must_use]
    pub fn replace<T: Clone>(self, base: &[T], overrides: &PlatformOverrides<T>) -> Vec<T> {
        self.select(overrides).unwrap_or(base).to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn deps_overrides() -> PlatformOverrides<String> {
        [
            (Platform::Linux, vec!["dep3".to_string()]),
            (Platform::Windows, vec!["dep4".to_string()]),
        ]
        .into_iter()
        .collect()
    }

    fn base() -> Vec<String> {
        vec!["dep1".to_string(), "dep2".to_string()]
    }

    #[test]
    fn test_concat_per_target() {
        let overrides = deps_overrides();
        assert_eq!(
            PlatformGate::new(None, Platform::Linux).concat(&base(), &overrides),
            ["dep1", "dep2", "dep3"]
        );
        assert_eq!(
            PlatformGate::new(None, Platform::Windows).concat(&base(), &overrides),
            ["dep1", "dep2", "dep4"]
        );
        assert_eq!(
            PlatformGate::new(None, Platform::Darwin).concat(&base(), &overrides),
            ["dep1", "dep2"]
        );
    }

    #[test]
    fn test_pinned_instance_gates_overrides() {
        let overrides = deps_overrides();
        let gate = PlatformGate::new(Some(Platform::Darwin), Platform::Linux);
        assert!(!gate.is_open());
        assert_eq!(gate.concat(&base(), &overrides), ["dep1", "dep2"]);

        let gate = PlatformGate::new(Some(Platform::Linux), Platform::Linux);
        assert_eq!(gate.concat(&base(), &overrides), ["dep1", "dep2", "dep3"]);
    }

    #[test]
    fn test_override_only_category() {
        let overrides: PlatformOverrides<String> =
            [(Platform::Linux, vec!["test1".to_string()])].into_iter().collect();
        let gate = PlatformGate::new(None, Platform::Linux);
        assert_eq!(gate.concat(&[], &overrides), ["test1"]);
        assert!(PlatformGate::new(None, Platform::Windows)
            .concat(&[], &overrides)
            .is_empty());
    }

    #[test]
    fn test_replace_does_not_concatenate() {
        let overrides: PlatformOverrides<u8> = [(Platform::Linux, vec![9])].into_iter().collect();
        let gate = PlatformGate::new(None, Platform::Linux);
        assert_eq!(gate.replace(&[1, 2], &overrides), [9u8]);
        assert_eq!(
            PlatformGate::new(None, Platform::Ios).replace(&[1, 2], &overrides),
            [1u8, 2]
        );
    }

    #[test]
    fn test_insert_appends() {
        let mut overrides = PlatformOverrides::new();
        overrides.insert(Platform::Linux, ["a"]);
        overrides.insert(Platform::Linux, ["a", "b"]);
        assert_eq!(overrides.get(Platform::Linux), Some(&["a", "a", "b"][..]));
        assert_eq!(overrides.platforms().collect::<Vec<_>>(), [Platform::Linux]);
    }

    fn platform() -> impl Strategy<Value = Platform> {
        prop::sample::select(Platform::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_concat_keeps_base_prefix(
            base in prop::collection::vec("[a-c]{1,3}", 0..6),
            extra in prop::collection::vec("[a-c]{1,3}", 0..6),
            keyed in platform(),
            target in platform(),
        ) {
            let overrides: PlatformOverrides<String> = [(keyed, extra.clone())].into_iter().collect();
            let resolved = PlatformGate::new(None, target).concat(&base, &overrides);
            prop_assert_eq!(&resolved[..base.len()], &base[..]);
            if keyed == target {
                prop_assert_eq!(&resolved[base.len()..], &extra[..]);
            } else {
                prop_assert_eq!(resolved.len(), base.len());
            }
        }
    }
}
