//! Documented-set index
//!
//! Single source of truth for which types and namespaces have generated
//! pages. Built once after the model is loaded, read-only afterwards, and
//! consulted by the inheritance resolver and every link emitter so they can
//! never disagree about what is internal and what renders as an external,
//! unlinked reference.

use std::collections::HashSet;

use crate::model::{Namespace, TypeGraph};

#[derive(Debug)]
pub struct DocIndex {
    types: HashSet<String>,
    namespaces: HashSet<Namespace>,
}

impl DocIndex {
    pub fn build(graph: &TypeGraph) -> Self {
        let mut types = HashSet::new();
        let mut namespaces = HashSet::new();
        for t in graph.types() {
            if t.documented {
                types.insert(t.qualified_name.clone());
                namespaces.insert(t.namespace.clone());
            }
        }
        for ns in graph.namespaces() {
            namespaces.insert(ns.name.clone());
        }
        DocIndex { types, namespaces }
    }

    pub fn is_documented_type(&self, qualified_name: &str) -> bool {
        self.types.contains(qualified_name)
    }

    pub fn is_documented_namespace(&self, ns: &Namespace) -> bool {
        self.namespaces.contains(ns)
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }
}
