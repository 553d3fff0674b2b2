// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-mod collection of base-game function overrides.

use std::collections::BTreeMap;

use crate::error::{DuplicateOverrideError, SourceLocation};

/// One redefinition of a catalog function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    /// Catalog name (`a:b` is normalized to `a.b`).
    pub name: String,
    /// Source text from the definition start through its closing `end`.
    pub body: String,
    pub location: SourceLocation,
}

/// A top-level capture of a base function (`local old_code = code`).
///
/// Mods use these to chain to the base implementation from their override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hook {
    pub alias: String,
    pub target: String,
    pub location: SourceLocation,
}

/// Overrides of one mod, keyed by function name. Each name appears once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    overrides: BTreeMap<String, Override>,
    hooks: Vec<Hook>,
}

impl OverrideSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOverrideError` if `item.name` is already present;
    /// the set is left unchanged.
    pub fn insert(&mut self, modid: &str, item: Override) -> Result<(), DuplicateOverrideError> {
        if let Some(existing) = self.overrides.get(&item.name) {
            return Err(DuplicateOverrideError {
                modid: modid.to_string(),
                function: item.name,
                first: existing.location.clone(),
                second: item.location,
            });
        }
        self.overrides.insert(item.name.clone(), item);
        Ok(())
    }

    pub fn add_hook(&mut self, hook: Hook) {
        self.hooks.push(hook);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Override> {
        self.overrides.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    /// Overridden names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.overrides.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Override> {
        self.overrides.values()
    }

    #[must_use]
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    #[must_use]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        self.names().all(|name| !other.contains(name))
    }

    /// Names overridden by both sets, sorted.
    #[must_use]
    pub fn conflicts_with(&self, other: &Self) -> Vec<String> {
        self.names()
            .filter(|name| other.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Union of two sets. On a shared name the entry from `self` is kept,
    /// so callers check [`Self::conflicts_with`] first.
    #[must_use]
    pub fn union(mut self, other: Self) -> Self {
        for (name, item) in other.overrides {
            self.overrides.entry(name).or_insert(item);
        }
        self.hooks.extend(other.hooks);
        self
    }
}
