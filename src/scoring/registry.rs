//! Pattern registry for han/fu lookup.
//!
//! The `PatternRegistry` holds the patterns a scorer evaluates, with the
//! han and fu in effect for the current rules. It starts from the built-in
//! table and applies the per-pattern overrides from `GameOptions`.

use log::debug;
use rustc_hash::FxHashMap;

use super::patterns::{MultiplicityFn, PatternDef, PATTERNS};
use super::PatternData;

/// A pattern with the han and fu it is worth under the current rules.
#[derive(Clone)]
pub struct RegisteredPattern {
    pub name: &'static str,
    pub data: PatternData,
    multiplicity: MultiplicityFn,
}

impl std::fmt::Debug for RegisteredPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredPattern")
            .field("name", &self.name)
            .field("data", &self.data)
            .finish()
    }
}

impl RegisteredPattern {
    #[must_use]
    pub fn multiplicity(&self) -> MultiplicityFn {
        self.multiplicity
    }
}

/// Registry of scoring patterns, in evaluation order.
///
/// ## Example
///
/// ```
/// use rust_mahjong::scoring::{PatternData, PatternRegistry};
/// use rustc_hash::FxHashMap;
///
/// let mut overrides = FxHashMap::default();
/// overrides.insert("RIICHI".to_string(), PatternData::new("Riichi", 2, 0));
///
/// let registry = PatternRegistry::with_overrides(&overrides);
/// assert_eq!(registry.get("RIICHI").unwrap().data.han, 2);
/// assert_eq!(registry.get("IPPATSU").unwrap().data.han, 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct PatternRegistry {
    patterns: Vec<RegisteredPattern>,
    index: FxHashMap<&'static str, usize>,
}

impl PatternRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in pattern with its default han and fu.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for def in PATTERNS {
            registry.register(*def);
        }
        registry
    }

    /// The built-in patterns with `overrides` applied by name.
    ///
    /// Overrides for names without a built-in pattern are ignored.
    #[must_use]
    pub fn with_overrides(overrides: &FxHashMap<String, PatternData>) -> Self {
        let mut registry = Self::standard();
        for (name, data) in overrides {
            match registry.index.get(name.as_str()) {
                Some(&index) => registry.patterns[index].data = data.clone(),
                None => debug!("Ignoring override for unknown pattern {}", name),
            }
        }
        registry
    }

    /// Register a pattern.
    ///
    /// Panics if a pattern with the same name already exists.
    pub fn register(&mut self, def: PatternDef) {
        if self.index.contains_key(def.name) {
            panic!("Pattern {} already registered", def.name);
        }
        self.index.insert(def.name, self.patterns.len());
        self.patterns.push(RegisteredPattern {
            name: def.name,
            data: PatternData::new(def.display_name, def.han, def.fu),
            multiplicity: def.multiplicity,
        });
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RegisteredPattern> {
        self.index.get(name).map(|&index| &self.patterns[index])
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RegisteredPattern> {
        self.patterns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry() {
        let registry = PatternRegistry::standard();
        assert_eq!(registry.len(), PATTERNS.len());
        assert!(registry.contains("THIRTEEN_ORPHANS"));
        assert!(!registry.contains("NOT_A_PATTERN"));
        assert_eq!(registry.iter().next().unwrap().name, "BLESSING_OF_HEAVEN");
    }

    #[test]
    fn test_unknown_override_is_ignored() {
        let mut overrides = FxHashMap::default();
        overrides.insert("NOT_A_PATTERN".to_string(), PatternData::new("Nope", 5, 0));
        let registry = PatternRegistry::with_overrides(&overrides);
        assert_eq!(registry.len(), PATTERNS.len());
        assert!(registry.get("NOT_A_PATTERN").is_none());
    }

    #[test]
    #[should_panic(expected = "already registered")]
    fn test_duplicate_name_panics() {
        let mut registry = PatternRegistry::standard();
        registry.register(PATTERNS[0]);
    }

    #[test]
    fn test_empty_registry() {
        let registry = PatternRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.get("RIICHI").is_none());
    }
}
