use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Dot-delimited namespace identifier. The empty identifier is the root
/// namespace, which anchors the global indexes and shared assets.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Namespace(String);

impl Namespace {
    pub fn root() -> Self {
        Namespace(String::new())
    }

    pub fn new(dotted: impl Into<String>) -> Self {
        Namespace(dotted.into())
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments in order; empty for the root namespace.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|s| !s.is_empty())
    }

    /// Directory of this namespace's pages under `root`.
    pub fn dir_under(&self, root: &Path) -> PathBuf {
        let mut dir = root.to_path_buf();
        for seg in self.segments() {
            dir.push(seg);
        }
        dir
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Namespace({:?})", self.0)
    }
}

// Lexicographic by segment, so `a.b` sorts between `a` and `a.b.c` and
// sibling order does not depend on the raw byte value of the separator.
impl Ord for Namespace {
    fn cmp(&self, other: &Self) -> Ordering {
        self.segments().cmp(other.segments())
    }
}

impl PartialOrd for Namespace {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Class => write!(f, "class"),
            TypeKind::Interface => write!(f, "interface"),
            TypeKind::Enum => write!(f, "enum"),
            TypeKind::Annotation => write!(f, "@interface"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Field,
    Constructor,
    Method,
}

/// A formal parameter: display name plus an opaque type descriptor.
/// Descriptors are compared as strings for overload identity and are
/// otherwise passed through to the page verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: String,
}

/// A field, constructor, or method declared directly on one type.
#[derive(Debug, Clone)]
pub struct MemberEntity {
    pub name: String,
    pub kind: MemberKind,
    pub params: Vec<Param>,
    /// Return type descriptor; methods only.
    pub returns: Option<String>,
    /// Field type descriptor; fields only.
    pub ty: Option<String>,
    pub constant_value: Option<String>,
    pub is_static: bool,
    pub is_final: bool,
    pub is_abstract: bool,
    pub deprecated: bool,
    pub doc: Option<String>,
    pub since: Option<String>,
    pub line: Option<u32>,
}

impl MemberEntity {
    /// Erased parameter list, e.g. `(int, String)`. Overload identity for
    /// methods and constructors.
    pub fn signature(&self) -> String {
        let mut sig = String::from("(");
        for (i, p) in self.params.iter().enumerate() {
            if i > 0 {
                sig.push_str(", ");
            }
            sig.push_str(&p.ty);
        }
        sig.push(')');
        sig
    }

    /// Override-equivalence: same name and same erased parameter types.
    /// Return type and declaring type do not participate.
    pub fn overrides_compatible(&self, other: &MemberEntity) -> bool {
        self.name == other.name
            && self.params.len() == other.params.len()
            && self.params.iter().zip(&other.params).all(|(a, b)| a.ty == b.ty)
    }
}

/// A class, interface, enum, or annotation declaration. Immutable once the
/// graph is loaded; superclass and interface references are by qualified
/// name, never by embedding.
#[derive(Debug, Clone)]
pub struct TypeEntity {
    pub qualified_name: String,
    /// Simple name, the last segment of the qualified name.
    pub name: String,
    pub namespace: Namespace,
    pub kind: TypeKind,
    pub superclass: Option<String>,
    /// Directly implemented (or, for interfaces, extended) interfaces, in
    /// declaration order.
    pub interfaces: Vec<String>,
    /// True iff this type gets a generated page.
    pub documented: bool,
    pub is_abstract: bool,
    pub is_final: bool,
    pub deprecated: bool,
    pub doc: Option<String>,
    pub since: Option<String>,
    pub line: Option<u32>,
    pub enum_constants: Vec<MemberEntity>,
    pub fields: Vec<MemberEntity>,
    pub constructors: Vec<MemberEntity>,
    pub methods: Vec<MemberEntity>,
}

impl TypeEntity {
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeKind::Interface)
    }

    /// A constructor the author never wrote: no recorded position, or a
    /// position coinciding with the type declaration itself.
    pub fn is_default_constructor(&self, ctor: &MemberEntity) -> bool {
        ctor.kind == MemberKind::Constructor
            && match (ctor.line, self.line) {
                (None, _) => true,
                (Some(c), Some(t)) => c == t,
                (Some(_), None) => false,
            }
    }
}

/// Namespace-level documentation supplied by the model.
#[derive(Debug, Clone)]
pub struct NamespaceEntity {
    pub name: Namespace,
    pub doc: Option<String>,
    pub since: Option<String>,
}

/// The sealed type graph: every declaration the model supplied, documented
/// or external, keyed by qualified name.
#[derive(Debug, Default)]
pub struct TypeGraph {
    pub(crate) types: HashMap<String, TypeEntity>,
    pub(crate) namespaces: BTreeMap<Namespace, NamespaceEntity>,
}

impl TypeGraph {
    pub fn get(&self, qualified_name: &str) -> Option<&TypeEntity> {
        self.types.get(qualified_name)
    }

    pub fn types(&self) -> impl Iterator<Item = &TypeEntity> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn namespace(&self, ns: &Namespace) -> Option<&NamespaceEntity> {
        self.namespaces.get(ns)
    }

    /// Documented namespaces in segment order.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceEntity> {
        self.namespaces.values()
    }

    pub fn superclass_of(&self, t: &TypeEntity) -> Option<&TypeEntity> {
        t.superclass.as_deref().and_then(|n| self.get(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_namespace_segments() {
        let ns = Namespace::new("a.b.c");
        assert_eq!(ns.segments().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert!(Namespace::root().is_root());
        assert_eq!(Namespace::root().segments().count(), 0);
    }

    #[test]
    fn test_namespace_order_is_by_segment() {
        let mut list = vec![
            Namespace::new("a.b.c"),
            Namespace::new("a"),
            Namespace::new("a.b"),
            Namespace::root(),
            Namespace::new("ab"),
        ];
        list.sort();
        let sorted: Vec<&str> = list.iter().map(|n| n.as_str()).collect();
        // `a.b` comes before `ab`: segment order, not raw string order.
        assert_eq!(sorted, vec!["", "a", "a.b", "a.b.c", "ab"]);
    }

    #[test]
    fn test_signature_and_override_equivalence() {
        let m1 = MemberEntity {
            name: "join".into(),
            kind: MemberKind::Method,
            params: vec![
                Param { name: "sep".into(), ty: "String".into() },
                Param { name: "parts".into(), ty: "String[]".into() },
            ],
            returns: Some("String".into()),
            ty: None,
            constant_value: None,
            is_static: false,
            is_final: false,
            is_abstract: false,
            deprecated: false,
            doc: None,
            since: None,
            line: None,
        };
        let mut m2 = m1.clone();
        m2.returns = Some("CharSequence".into());
        m2.params[0].name = "delimiter".into();

        assert_eq!(m1.signature(), "(String, String[])");
        // Return type and parameter names do not matter.
        assert!(m1.overrides_compatible(&m2));

        m2.params[1].ty = "CharSequence[]".into();
        assert!(!m1.overrides_compatible(&m2));
    }

    #[test]
    fn test_default_constructor_flag() {
        let ctor = |line: Option<u32>| MemberEntity {
            name: "Widget".into(),
            kind: MemberKind::Constructor,
            params: vec![],
            returns: None,
            ty: None,
            constant_value: None,
            is_static: false,
            is_final: false,
            is_abstract: false,
            deprecated: false,
            doc: None,
            since: None,
            line,
        };
        let mut t = TypeEntity {
            qualified_name: "ui.Widget".into(),
            name: "Widget".into(),
            namespace: Namespace::new("ui"),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: vec![],
            documented: true,
            is_abstract: false,
            is_final: false,
            deprecated: false,
            doc: None,
            since: None,
            line: Some(10),
            enum_constants: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![],
        };
        assert!(t.is_default_constructor(&ctor(None)));
        assert!(t.is_default_constructor(&ctor(Some(10))));
        assert!(!t.is_default_constructor(&ctor(Some(12))));
        t.line = None;
        assert!(!t.is_default_constructor(&ctor(Some(12))));
    }
}
