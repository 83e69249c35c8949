use std::collections::HashMap;

use indexmap::IndexMap;

use crate::ir::{IrEnum, IrEnumKind, IrEnumMember, IrField, IrModel};

/// Name-keyed store of the models and enums generated during one pass.
///
/// Entries are only ever added. A model may be reserved before its fields are
/// known so that recursive references to it resolve to its name; the
/// reservation fixes its position in iteration order and is completed once.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    models: IndexMap<String, Option<Vec<IrField>>>,
    enums: IndexMap<String, (IrEnumKind, Vec<IrEnumMember>)>,
    fingerprints: HashMap<String, String>,
}

/// Outcome of asking the registry for a name under the disambiguating
/// collision strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameClaim {
    /// A type with this name and the same shape already exists.
    Existing(String),
    /// The name is free to register.
    Fresh(String),
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_model(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains_key(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.has_model(name) || self.has_enum(name)
    }

    /// Number of distinct generated names.
    pub fn len(&self) -> usize {
        self.models.len() + self.enums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register an enum. Returns `false` and leaves the registry untouched if
    /// the name is already taken.
    pub fn register_enum(
        &mut self,
        name: &str,
        kind: IrEnumKind,
        members: Vec<IrEnumMember>,
    ) -> bool {
        if self.contains(name) {
            return false;
        }
        log::debug!("registered enum {name} ({} members)", members.len());
        self.enums.insert(name.to_string(), (kind, members));
        true
    }

    /// Reserve a model name ahead of resolving its fields.
    pub fn reserve_model(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.models.insert(name.to_string(), None);
        true
    }

    /// Register a model, or complete a pending reservation. Returns `false`
    /// if a completed model with this name (or an enum) already exists.
    pub fn register_model(&mut self, name: &str, fields: Vec<IrField>) -> bool {
        if self.has_enum(name) {
            return false;
        }
        match self.models.get_mut(name) {
            Some(Some(_)) => false,
            Some(slot) => {
                log::debug!("registered model {name} ({} fields)", fields.len());
                *slot = Some(fields);
                true
            }
            None => {
                log::debug!("registered model {name} ({} fields)", fields.len());
                self.models.insert(name.to_string(), Some(fields));
                true
            }
        }
    }

    /// Record the structural fingerprint of a registered name.
    pub fn set_fingerprint(&mut self, name: &str, fingerprint: String) {
        self.fingerprints
            .entry(name.to_string())
            .or_insert(fingerprint);
    }

    /// Find a registered type named `base` (or `base2`, `base3`, ...) whose
    /// shape matches `fingerprint`.
    pub fn lookup(&self, base: &str, fingerprint: &str) -> Option<String> {
        match self.claim(base, fingerprint) {
            NameClaim::Existing(name) => Some(name),
            NameClaim::Fresh(_) => None,
        }
    }

    /// Pick the name a type of the given shape should use: an existing
    /// same-shaped type, or the first free numbered variant of `base`.
    pub fn claim(&self, base: &str, fingerprint: &str) -> NameClaim {
        let mut suffix = 1usize;
        loop {
            let candidate = if suffix == 1 {
                base.to_string()
            } else {
                format!("{base}{suffix}")
            };
            if !self.contains(&candidate) {
                return NameClaim::Fresh(candidate);
            }
            if self.fingerprints.get(&candidate).map(String::as_str) == Some(fingerprint) {
                return NameClaim::Existing(candidate);
            }
            suffix += 1;
        }
    }

    /// Consume the registry, yielding enums and models in insertion order.
    pub fn into_parts(self) -> (Vec<IrEnum>, Vec<IrModel>) {
        let enums = self
            .enums
            .into_iter()
            .map(|(name, (kind, members))| IrEnum {
                name,
                kind,
                members,
            })
            .collect();
        let models = self
            .models
            .into_iter()
            .map(|(name, fields)| IrModel {
                name,
                fields: fields.unwrap_or_default(),
            })
            .collect();
        (enums, models)
    }
}
