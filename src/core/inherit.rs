//! Member inheritance resolution
//!
//! Computes, for one target type, the effective set of visible fields and
//! methods by walking the superclass chain and the implemented-interface
//! graph of the sealed type model. Fields shadow by name, methods merge by
//! override-equivalence, and every surviving member is classified by where
//! it was declared relative to the target. The classification is what the
//! renderer keys links off, so a merge miss here becomes a duplicate row or
//! a dead link on the page.

use std::collections::HashSet;

use thiserror::Error;
use tracing::debug;

use super::index::DocIndex;
use crate::model::{MemberEntity, TypeEntity, TypeGraph};

/// Where a resolved member was declared relative to the target type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// Declared on the target itself.
    Declared,
    /// Inherited from an ancestor that has its own page.
    InheritedDocumented,
    /// Inherited from an ancestor outside the documented set; rendered as an
    /// unlinked label.
    InheritedExternal,
}

/// A member together with its declaring type.
#[derive(Debug, Clone, Copy)]
pub struct MemberRef<'a> {
    pub owner: &'a TypeEntity,
    pub member: &'a MemberEntity,
}

/// One surviving member of the target's effective member set.
#[derive(Debug)]
pub struct ResolvedMember<'a> {
    pub member: &'a MemberEntity,
    pub owner: &'a TypeEntity,
    pub provenance: Provenance,
    /// The nearest ancestor declaration this member replaces; methods only.
    pub overrides: Option<MemberRef<'a>>,
}

impl ResolvedMember<'_> {
    pub fn is_inherited(&self) -> bool {
        self.provenance != Provenance::Declared
    }

    pub fn is_external(&self) -> bool {
        self.provenance == Provenance::InheritedExternal
    }
}

/// Effective member set of one type, in traversal encounter order. The
/// order is deterministic for a given graph; sorting for display is the
/// renderer's concern.
#[derive(Debug, Default)]
pub struct ResolvedMembers<'a> {
    pub fields: Vec<ResolvedMember<'a>>,
    pub methods: Vec<ResolvedMember<'a>>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The class-extension chain loops back on itself; resolution for this
    /// type cannot terminate.
    #[error("cyclic class extension involving `{0}`")]
    CyclicExtension(String),
}

/// Walks the sealed graph; holds no per-type state, so one resolver can
/// serve any number of targets.
pub struct MemberResolver<'a> {
    graph: &'a TypeGraph,
    index: &'a DocIndex,
}

impl<'a> MemberResolver<'a> {
    pub fn new(graph: &'a TypeGraph, index: &'a DocIndex) -> Self {
        MemberResolver { graph, index }
    }

    /// Resolve the effective fields and methods of `target`.
    pub fn resolve(&self, target: &'a TypeEntity) -> Result<ResolvedMembers<'a>, ResolveError> {
        self.check_extension_chain(target)?;

        let mut out = ResolvedMembers::default();

        let mut seen_names = HashSet::new();
        let mut visited = HashSet::new();
        self.collect_fields(target, target, &mut out.fields, &mut seen_names, &mut visited);

        let mut visited = HashSet::new();
        self.collect_methods(target, target, &mut out.methods, &mut visited);

        Ok(out)
    }

    /// A type transitively extending itself cannot be resolved; report it
    /// before the traversal so the walk itself never has to care.
    fn check_extension_chain(&self, target: &'a TypeEntity) -> Result<(), ResolveError> {
        let mut chain = HashSet::new();
        chain.insert(target.qualified_name.as_str());
        let mut cur = target;
        while let Some(sup) = self.graph.superclass_of(cur) {
            if !chain.insert(sup.qualified_name.as_str()) {
                return Err(ResolveError::CyclicExtension(sup.qualified_name.clone()));
            }
            cur = sup;
        }
        Ok(())
    }

    /// Field shadowing: the first declaration of a name on the walk wins,
    /// regardless of the field's type.
    fn collect_fields(
        &self,
        target: &'a TypeEntity,
        cur: &'a TypeEntity,
        out: &mut Vec<ResolvedMember<'a>>,
        seen_names: &mut HashSet<&'a str>,
        visited: &mut HashSet<&'a str>,
    ) {
        // Keyed by qualified name (type identity): the same interface can be
        // reached along several paths, and simple names can repeat across
        // namespaces.
        if !visited.insert(cur.qualified_name.as_str()) {
            return;
        }
        for fld in &cur.fields {
            if seen_names.insert(fld.name.as_str()) {
                out.push(ResolvedMember {
                    member: fld,
                    owner: cur,
                    provenance: self.provenance(target, cur),
                    overrides: None,
                });
            }
        }
        if let Some(sup) = self.graph.superclass_of(cur) {
            self.collect_fields(target, sup, out, seen_names, visited);
        }
        for imp in self.interfaces(cur) {
            self.collect_fields(target, imp, out, seen_names, visited);
        }
    }

    /// Override merging. Own declarations first, then the superclass
    /// subtree, then direct interfaces in declaration order, so a class
    /// override is always recorded before any interface declaration it
    /// replaces.
    fn collect_methods(
        &self,
        target: &'a TypeEntity,
        cur: &'a TypeEntity,
        out: &mut Vec<ResolvedMember<'a>>,
        visited: &mut HashSet<&'a str>,
    ) {
        if !visited.insert(cur.qualified_name.as_str()) {
            return;
        }
        for met in &cur.methods {
            match out.iter_mut().find(|r| r.member.overrides_compatible(met)) {
                Some(existing) => {
                    // A closer declaration already shadows this one. Keep the
                    // nearest overridden declaration for the "overrides"
                    // line; later, more distant hits do not replace it.
                    if existing.overrides.is_none() {
                        existing.overrides = Some(MemberRef {
                            owner: cur,
                            member: met,
                        });
                    }
                    if existing.provenance != Provenance::Declared
                        && existing.owner.is_interface()
                        && cur.is_interface()
                        && existing.owner.qualified_name != cur.qualified_name
                        && !self.inherits_from(existing.owner, cur)
                    {
                        debug!(
                            "Ambiguous default for {}: `{}{}` provided by both `{}` and `{}`",
                            target.qualified_name,
                            met.name,
                            met.signature(),
                            existing.owner.qualified_name,
                            cur.qualified_name
                        );
                    }
                }
                None => out.push(ResolvedMember {
                    member: met,
                    owner: cur,
                    provenance: self.provenance(target, cur),
                    overrides: None,
                }),
            }
        }
        if let Some(sup) = self.graph.superclass_of(cur) {
            self.collect_methods(target, sup, out, visited);
        }
        for imp in self.interfaces(cur) {
            self.collect_methods(target, imp, out, visited);
        }
    }

    fn provenance(&self, target: &TypeEntity, owner: &TypeEntity) -> Provenance {
        if owner.qualified_name == target.qualified_name {
            Provenance::Declared
        } else if self.index.is_documented_type(&owner.qualified_name) {
            Provenance::InheritedDocumented
        } else {
            Provenance::InheritedExternal
        }
    }

    fn interfaces(&self, t: &'a TypeEntity) -> impl Iterator<Item = &'a TypeEntity> + '_ {
        t.interfaces.iter().filter_map(|n| self.graph.get(n))
    }

    /// Whether `ancestor` is reachable from `t` through superclasses or
    /// interfaces.
    fn inherits_from(&self, t: &'a TypeEntity, ancestor: &TypeEntity) -> bool {
        let mut visited = HashSet::new();
        let mut stack = vec![t];
        while let Some(cur) = stack.pop() {
            if !visited.insert(cur.qualified_name.as_str()) {
                continue;
            }
            if cur.qualified_name != t.qualified_name
                && cur.qualified_name == ancestor.qualified_name
            {
                return true;
            }
            if let Some(sup) = self.graph.superclass_of(cur) {
                stack.push(sup);
            }
            stack.extend(self.interfaces(cur));
        }
        false
    }
}
