//! Per-namespace index page
//!
//! Lists the documented types of one namespace, grouped by kind.

use crate::core::DocIndex;
use crate::model::{Namespace, NamespaceEntity, TypeEntity, TypeGraph, TypeKind};

use super::html::{escape, first_sentence, type_name_sort, Page};
use super::RenderOptions;
use crate::core::links::NAMESPACE_INDEX_FILE;

pub fn render(
    graph: &TypeGraph,
    index: &DocIndex,
    opts: &RenderOptions,
    ns: &NamespaceEntity,
) -> String {
    let mut page = Page::new(graph, index, opts, ns.name.clone());

    let title = if ns.name.is_root() {
        "(root)".to_string()
    } else {
        ns.name.to_string()
    };
    page.page_start(&title, NAMESPACE_INDEX_FILE, &[], true);

    page.since_line(ns.since.as_deref());
    page.comment_par(ns.doc.as_deref());

    page.line("<div class=\"summary\">");
    page.line("<h2>Summary</h2>");

    let mut sum = false;
    sum |= type_list(&mut page, &ns.name, "Interfaces", TypeKind::Interface);
    sum |= type_list(&mut page, &ns.name, "Enums", TypeKind::Enum);
    sum |= type_list(&mut page, &ns.name, "Classes", TypeKind::Class);
    sum |= type_list(&mut page, &ns.name, "Annotations", TypeKind::Annotation);
    if !sum {
        page.line("<p class=\"overrides\">Nothing to show.</p>");
    }

    page.line("</div>");
    page.page_end();
    page.finish()
}

fn type_list(page: &mut Page, ns: &Namespace, title: &str, kind: TypeKind) -> bool {
    let graph = page.graph;
    let index = page.index;
    let mut list: Vec<&TypeEntity> = graph
        .types()
        .filter(|t| {
            t.kind == kind && t.namespace == *ns && index.is_documented_type(&t.qualified_name)
        })
        .collect();
    if list.is_empty() {
        return false;
    }
    list.sort_by(|a, b| type_name_sort(a, b));

    page.line("<div class=\"summary-item\">");
    page.push(&format!("<h5>{title}</h5>\n"));
    page.line("<table>");
    for t in list {
        page.push("<tr><td class=\"mods\">");
        page.push(&format!(
            "<code><span class=\"name\"><a href=\"{}.html\" title=\"{}\">{}</a></span></code>",
            t.name,
            escape(&t.qualified_name),
            escape(&t.name)
        ));
        page.push("</td><td>\n");
        if t.deprecated {
            page.push("<span class=\"depr\">Deprecated</span>");
        } else if let Some(doc) = &t.doc {
            page.push(&escape(first_sentence(doc)));
        }
        page.line("</td></tr>");
    }
    page.line("</table>");
    page.line("</div>");
    true
}
