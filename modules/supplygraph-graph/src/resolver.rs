use std::collections::HashMap;

use supplygraph_common::{normalize_name, EntityLabel, Role};

/// An entity that has been assigned an id during this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub id: String,
    pub name: String,
    pub label: EntityLabel,
}

/// Result of a single `resolve` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub id: String,
    /// True the first time this `(label, name)` pair is seen in the run.
    pub is_new: bool,
}

/// Maps `(label, normalized name)` to a stable id for the duration of one run.
///
/// Ids are `<role prefix>_<n>` where `n` counts entities already allocated
/// under the same label, so the same input in the same order always yields
/// the same ids. Identity is scoped per label: "Acme" as a Supplier and
/// "Acme" as a Restaurant are two different entities.
#[derive(Debug, Default)]
pub struct EntityResolver {
    ids: HashMap<(EntityLabel, String), String>,
    per_label: HashMap<EntityLabel, usize>,
    entities: Vec<ResolvedEntity>,
}

impl EntityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(&mut self, name: &str, role: Role) -> Resolution {
        let label = role.label();
        let name = normalize_name(name);
        let key = (label, name);

        if let Some(id) = self.ids.get(&key) {
            return Resolution {
                id: id.clone(),
                is_new: false,
            };
        }

        let seq = self.per_label.entry(label).or_insert(0);
        *seq += 1;
        let id = format!("{}_{}", role.id_prefix(), seq);

        self.entities.push(ResolvedEntity {
            id: id.clone(),
            name: key.1.clone(),
            label,
        });
        self.ids.insert(key, id.clone());

        Resolution { id, is_new: true }
    }

    /// Entities in allocation order.
    pub fn entities(&self) -> &[ResolvedEntity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

/// Run-scoped state shared by the planning stages. One per pipeline run.
#[derive(Debug, Default)]
pub struct RunContext {
    pub resolver: EntityResolver,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }
}
