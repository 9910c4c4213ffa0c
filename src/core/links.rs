//! Relative link resolution
//!
//! Pages live in a directory tree mirroring the namespace hierarchy, and
//! every cross-page reference is emitted as a relative path so the whole
//! output tree can be relocated or served from any prefix. The computation
//! is pure path algebra over namespace segments and never touches the type
//! graph.

use std::collections::HashMap;

use crate::model::{Namespace, TypeEntity};

/// Fixed file name of every namespace index page.
pub const NAMESPACE_INDEX_FILE: &str = "index.html";

/// Relative path from a page in `from` to the directory of `to`.
///
/// Empty when the namespaces are identical; otherwise one `../` per `from`
/// segment beyond the longest common segment prefix, followed by the
/// remaining `to` segments, each with a trailing `/`. Comparison is by whole
/// segment: `a.b` and `a.bc` are siblings under `a`, not parent and child.
pub fn relative_path(from: &Namespace, to: &Namespace) -> String {
    let from: Vec<&str> = from.segments().collect();
    let to: Vec<&str> = to.segments().collect();
    let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
    if common == from.len() && common == to.len() {
        return String::new();
    }

    let mut link = String::new();
    for _ in common..from.len() {
        link.push_str("../");
    }
    for seg in &to[common..] {
        link.push_str(seg);
        link.push('/');
    }
    link
}

/// Link computer anchored at one page's namespace, memoizing per
/// destination. One instance per page, discarded with the page; the
/// underlying function is pure over immutable inputs, so caching needs no
/// invalidation.
pub struct PageLinks {
    from: Namespace,
    cache: HashMap<Namespace, String>,
}

impl PageLinks {
    pub fn new(from: Namespace) -> Self {
        PageLinks {
            from,
            cache: HashMap::new(),
        }
    }

    /// Relative directory path to `dst`, memoized.
    pub fn to_namespace(&mut self, dst: &Namespace) -> &str {
        self.cache
            .entry(dst.clone())
            .or_insert_with(|| relative_path(&self.from, dst))
    }

    /// Relative link to a type's page.
    pub fn to_type(&mut self, t: &TypeEntity) -> String {
        format!("{}{}.html", self.to_namespace(&t.namespace), t.name)
    }

    /// Relative link to a namespace's index page.
    pub fn to_index(&mut self, ns: &Namespace) -> String {
        format!("{}{}", self.to_namespace(ns), NAMESPACE_INDEX_FILE)
    }

    /// Relative prefix of the output root, where the global indexes and
    /// shared assets live.
    pub fn to_root(&mut self) -> String {
        self.to_namespace(&Namespace::root()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(from: &str, to: &str) -> String {
        relative_path(&Namespace::new(from), &Namespace::new(to))
    }

    #[test]
    fn test_same_namespace_is_empty() {
        assert_eq!(rel("", ""), "");
        assert_eq!(rel("a", "a"), "");
        assert_eq!(rel("a.b.c", "a.b.c"), "");
    }

    #[test]
    fn test_to_and_from_root() {
        assert_eq!(rel("", "a.b"), "a/b/");
        assert_eq!(rel("a.b", ""), "../../");
        assert_eq!(rel("a", ""), "../");
    }

    #[test]
    fn test_descend_and_ascend() {
        assert_eq!(rel("a", "a.b"), "b/");
        assert_eq!(rel("a.b", "a"), "../");
        assert_eq!(rel("a.b.c", "a"), "../../");
        assert_eq!(rel("a", "a.b.c"), "b/c/");
    }

    #[test]
    fn test_siblings_and_cousins() {
        assert_eq!(rel("a.b", "a.c"), "../c/");
        assert_eq!(rel("a.b.c", "a.d"), "../../d/");
        assert_eq!(rel("a.b", "x.y"), "../../x/y/");
    }

    #[test]
    fn test_segment_boundaries_not_string_prefixes() {
        // `a.bc` is a sibling of `a.b` under `a`, never its child.
        assert_eq!(rel("a.b", "a.bc"), "../bc/");
        assert_eq!(rel("a.bc", "a.b"), "../b/");
        // `ab` shares nothing with `a`.
        assert_eq!(rel("a", "ab"), "../ab/");
    }

    /// Apply a relative link to a starting directory and normalize.
    fn apply(from: &Namespace, link: &str) -> Vec<String> {
        let mut loc: Vec<String> = from.segments().map(str::to_string).collect();
        for seg in link.split('/').filter(|s| !s.is_empty()) {
            if seg == ".." {
                assert!(loc.pop().is_some(), "ascended above the output root");
            } else {
                loc.push(seg.to_string());
            }
        }
        loc
    }

    #[test]
    fn test_round_trip_composition() {
        let names = [
            "", "a", "b", "ab", "a.b", "a.bc", "a.b.c", "a.b.d", "a.d.c", "x.y.z.w",
        ];
        for from in names {
            for to in names {
                let from = Namespace::new(from);
                let to = Namespace::new(to);
                let link = relative_path(&from, &to);
                let expected: Vec<String> = to.segments().map(str::to_string).collect();
                assert_eq!(
                    apply(&from, &link),
                    expected,
                    "from `{from}` via `{link}` must land in `{to}`"
                );
            }
        }
    }

    #[test]
    fn test_page_links_cache_and_suffixes() {
        use crate::model::TypeKind;

        let mut links = PageLinks::new(Namespace::new("a.b"));
        assert_eq!(links.to_namespace(&Namespace::new("a.c")), "../c/");
        // Second lookup is served from the memo.
        assert_eq!(links.to_namespace(&Namespace::new("a.c")), "../c/");
        assert_eq!(links.cache.len(), 1);

        assert_eq!(links.to_root(), "../../");
        assert_eq!(links.to_index(&Namespace::new("a")), "../index.html");

        let t = TypeEntity {
            qualified_name: "a.c.Widget".into(),
            name: "Widget".into(),
            namespace: Namespace::new("a.c"),
            kind: TypeKind::Class,
            superclass: None,
            interfaces: vec![],
            documented: true,
            is_abstract: false,
            is_final: false,
            deprecated: false,
            doc: None,
            since: None,
            line: None,
            enum_constants: vec![],
            fields: vec![],
            constructors: vec![],
            methods: vec![],
        };
        assert_eq!(links.to_type(&t), "../c/Widget.html");
    }
}
