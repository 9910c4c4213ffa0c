//! Global index pages
//!
//! The namespace index at the output root, the flat type index next to it,
//! and the plain-text namespace manifest.

use crate::core::DocIndex;
use crate::model::{Namespace, TypeEntity, TypeGraph};

use super::html::{escape, first_sentence, type_name_sort, Page};
use super::RenderOptions;

/// File name of the flat type index at the output root.
pub const ALL_TYPES_FILE: &str = "alltypes.html";

/// Root `index.html`: every documented namespace with its first doc
/// sentence.
pub fn render_namespace_index(graph: &TypeGraph, index: &DocIndex, opts: &RenderOptions) -> String {
    let mut page = Page::new(graph, index, opts, Namespace::root());
    let title = opts.title.clone();
    page.page_start(&title, "index.html", &[], false);

    page.push(&format!(
        "<p><a href=\"{ALL_TYPES_FILE}\">List of all types</a></p>\n"
    ));
    page.line("<h2>Namespaces</h2>");

    page.line("<table>");
    for ns in graph.namespaces() {
        // This page doubles as the root namespace's index.
        if ns.name.is_root() {
            continue;
        }
        let href = page.links.to_index(&ns.name);
        page.push("<tr><td>");
        let name = escape(ns.name.as_str());
        page.push(&format!("<a href=\"{href}\" title=\"{name}\">{name}</a>"));
        page.push("</td><td>\n");
        if let Some(doc) = &ns.doc {
            page.push(&escape(first_sentence(doc)));
        }
        page.line("</td></tr>");
    }
    page.line("</table>");

    page.page_end();
    page.finish()
}

/// Flat index of every documented type, by simple name.
pub fn render_type_index(graph: &TypeGraph, index: &DocIndex, opts: &RenderOptions) -> String {
    let mut page = Page::new(graph, index, opts, Namespace::root());
    page.page_start("Type Index", ALL_TYPES_FILE, &[], false);

    let mut list: Vec<&TypeEntity> = graph
        .types()
        .filter(|t| index.is_documented_type(&t.qualified_name))
        .collect();
    list.sort_by(|a, b| type_name_sort(a, b));

    page.line("<div class=\"index\"><p>");
    for t in list {
        let href = page.links.to_type(t);
        page.push(&format!(
            "<a href=\"{}\" title=\"{}\">{}</a>",
            href,
            escape(&t.qualified_name),
            escape(&t.name)
        ));
        page.line("<br/>");
    }
    page.line("</p></div>");

    page.page_end();
    page.finish()
}

/// Plain-text manifest of documented namespaces, one per line.
pub fn namespace_list(graph: &TypeGraph) -> String {
    let mut out = String::new();
    for ns in graph.namespaces() {
        if !ns.name.is_root() {
            out.push_str(ns.name.as_str());
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::loader::from_json;

    fn graph() -> TypeGraph {
        from_json(
            r#"{
                "namespaces": [{"name": "b", "doc": "Namespace b."}],
                "types": [
                    {"qualified_name": "a.Zed", "kind": "class"},
                    {"qualified_name": "b.Ack", "kind": "class"},
                    {"qualified_name": "vendor.Hidden", "kind": "class", "external": true}
                ]
            }"#,
        )
        .unwrap()
    }

    fn opts() -> RenderOptions {
        RenderOptions {
            title: "Test API".into(),
            date: false,
        }
    }

    #[test]
    fn test_namespace_index() {
        let graph = graph();
        let index = DocIndex::build(&graph);
        let opts = opts();
        let html = render_namespace_index(&graph, &index, &opts);

        assert!(html.contains("List of all types"));
        assert!(html.contains("href=\"a/index.html\""));
        assert!(html.contains("href=\"b/index.html\""));
        assert!(html.contains("Namespace b."));
        assert!(!html.contains("vendor"));
    }

    #[test]
    fn test_type_index_sorted_by_simple_name() {
        let graph = graph();
        let index = DocIndex::build(&graph);
        let opts = opts();
        let html = render_type_index(&graph, &index, &opts);

        let ack = html.find("b/Ack.html").unwrap();
        let zed = html.find("a/Zed.html").unwrap();
        assert!(ack < zed);
        assert!(!html.contains("Hidden"));
    }

    #[test]
    fn test_namespace_list_manifest() {
        let graph = graph();
        assert_eq!(namespace_list(&graph), "a\nb\n");
    }
}
