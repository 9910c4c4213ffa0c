//! Per-type page
//!
//! One page per documented type: declaration signature, info card, summary
//! tables of the effective member set (inherited members included, external
//! ones collapsed behind a toggle), and a details section for the members
//! declared on the type itself.

use std::collections::HashSet;

use crate::core::{
    DocIndex, MemberRef, MemberResolver, Provenance, ResolveError, ResolvedMember,
};
use crate::model::{MemberEntity, MemberKind, TypeEntity, TypeGraph};

use super::html::{
    escape, first_sentence, member_anchor, member_mods, member_sort, method_sort, type_name_sort,
    Page,
};
use super::RenderOptions;

pub fn render(
    graph: &TypeGraph,
    index: &DocIndex,
    opts: &RenderOptions,
    target: &TypeEntity,
) -> Result<String, ResolveError> {
    let members = MemberResolver::new(graph, index).resolve(target)?;

    let mut page = Page::new(graph, index, opts, target.namespace.clone());
    let ns_nav = page.namespace_link(&target.namespace);
    page.page_start(
        &target.name,
        &format!("{}.html", target.name),
        &[ns_nav],
        false,
    );

    print_signature(&mut page, target);
    print_info_card(&mut page, target);

    page.since_line(target.since.as_deref());
    page.deprecated_block(target.deprecated);
    page.comment_par(target.doc.as_deref());

    // Summary
    page.line("<div class=\"summary\">");
    page.line("<h2>Summary</h2>");
    let mut sum = false;

    // Enum constants keep their declaration order.
    let enum_rows: Vec<ResolvedMember> = target
        .enum_constants
        .iter()
        .map(|m| declared(target, m))
        .collect();
    let enum_refs: Vec<&ResolvedMember> = enum_rows.iter().collect();
    sum |= field_table(&mut page, "Enum constants", &enum_refs, true);

    let mut fields: Vec<&ResolvedMember> = members.fields.iter().collect();
    fields.sort_by(|a, b| member_sort(index, a, b));
    let group = |keep: &dyn Fn(&ResolvedMember) -> bool| {
        fields.iter().copied().filter(|r| keep(r)).collect::<Vec<_>>()
    };
    sum |= field_table(
        &mut page,
        "Constants",
        &group(&|r| r.member.is_static && r.member.is_final),
        false,
    );
    sum |= field_table(
        &mut page,
        "Static Fields",
        &group(&|r| r.member.is_static && !r.member.is_final),
        false,
    );
    sum |= field_table(&mut page, "Instance Fields", &group(&|r| !r.member.is_static), false);

    let ctor_rows: Vec<ResolvedMember> = target
        .constructors
        .iter()
        .map(|m| declared(target, m))
        .collect();
    let mut ctor_refs: Vec<&ResolvedMember> = ctor_rows.iter().collect();
    ctor_refs.sort_by(|a, b| method_sort(index, a, b));
    sum |= method_table(&mut page, target, "Constructors", &ctor_refs);

    let mut methods: Vec<&ResolvedMember> = members.methods.iter().collect();
    methods.sort_by(|a, b| method_sort(index, a, b));
    let abstract_here =
        |r: &ResolvedMember| r.member.is_abstract || (r.owner.is_interface() && !target.is_interface());
    let mgroup = |keep: &dyn Fn(&ResolvedMember) -> bool| {
        methods.iter().copied().filter(|r| keep(r)).collect::<Vec<_>>()
    };
    sum |= method_table(
        &mut page,
        target,
        "Abstract Methods",
        &mgroup(&|r| abstract_here(r) && !r.member.is_static),
    );
    sum |= method_table(
        &mut page,
        target,
        if target.is_interface() { "Interface Methods" } else { "Instance Methods" },
        &mgroup(&|r| !abstract_here(r) && !r.member.is_static),
    );
    sum |= method_table(&mut page, target, "Static Methods", &mgroup(&|r| r.member.is_static));

    if !sum {
        page.line("<p class=\"overrides\">Nothing to show.</p>");
    }
    page.line("</div>");

    // Details: only members declared on this page's own type.
    page.line("<div class=\"details\">");
    for fld in &target.enum_constants {
        field_details(&mut page, fld);
    }
    for fld in &target.fields {
        field_details(&mut page, fld);
    }
    for ctor in &target.constructors {
        if !target.is_default_constructor(ctor) {
            method_details(&mut page, ctor, None);
        }
    }
    for met in &target.methods {
        let overridden = members
            .methods
            .iter()
            .find(|r| r.provenance == Provenance::Declared && std::ptr::eq(r.member, met))
            .and_then(|r| r.overrides);
        method_details(&mut page, met, overridden);
    }
    page.line("</div>");

    page.page_end();
    Ok(page.finish())
}

fn declared<'a>(target: &'a TypeEntity, member: &'a MemberEntity) -> ResolvedMember<'a> {
    ResolvedMember {
        member,
        owner: target,
        provenance: Provenance::Declared,
        overrides: None,
    }
}

fn print_signature(page: &mut Page, target: &TypeEntity) {
    page.push("<pre>");
    let mut decl = String::from("public");
    if target.is_abstract && !target.is_interface() {
        decl.push_str(" abstract");
    }
    if target.is_final {
        decl.push_str(" final");
    }
    page.push(&decl);
    page.push(&format!(
        " {} <span class=\"name\">{}</span>\n",
        target.kind,
        escape(&target.name)
    ));
    if let Some(sup) = target.superclass.as_deref() {
        page.push("extends ");
        let link = page.class_link(sup);
        page.push(&link);
        page.push("\n");
    }
    if !target.interfaces.is_empty() {
        page.push(if target.is_interface() { "extends " } else { "implements " });
        for (i, name) in target.interfaces.iter().enumerate() {
            if i > 0 {
                page.push(", ");
            }
            let link = page.class_link(name);
            page.push(&link);
        }
        page.push("\n");
    }
    page.line("</pre>");
}

fn print_info_card(page: &mut Page, target: &TypeEntity) {
    // Render the card into a side buffer; an empty card emits nothing.
    let saved = std::mem::take(&mut page.buf);
    print_hierarchy(page, target);
    print_all_interfaces(page, target);
    print_known_subclasses(page, target);
    print_known_implementing(page, target, true);
    print_known_implementing(page, target, false);
    let card = std::mem::replace(&mut page.buf, saved);

    if !card.is_empty() {
        page.line("<div class=\"infocard\"><dl>");
        page.push(&card);
        page.line("</dl></div>");
    }
}

fn print_hierarchy(page: &mut Page, target: &TypeEntity) {
    if target.is_interface() {
        return;
    }
    let graph = page.graph;
    let mut chain = vec![target];
    let mut cur = target;
    while let Some(sup) = graph.superclass_of(cur) {
        chain.push(sup);
        cur = sup;
    }

    page.line("<dt>Hierarchy:</dt><dd>");
    let mut parts: Vec<String> = Vec::new();
    // A superclass reference beyond the known graph still heads the chain,
    // as an unlinked label.
    if let Some(missing) = cur.superclass.as_deref() {
        parts.push(page.class_link(missing));
    }
    for t in chain.iter().rev() {
        if t.qualified_name == target.qualified_name {
            parts.push(escape(&t.name));
        } else {
            parts.push(page.class_link(&t.qualified_name));
        }
    }
    page.push(&parts.join(" &#11208; "));
    page.line("");
    page.line("</dd>");
}

fn all_interfaces<'a>(graph: &'a TypeGraph, target: &'a TypeEntity) -> Vec<&'a TypeEntity> {
    let mut out = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![target];
    while let Some(cur) = stack.pop() {
        if !visited.insert(cur.qualified_name.as_str()) {
            continue;
        }
        if cur.is_interface() && cur.qualified_name != target.qualified_name {
            out.push(cur);
        }
        if let Some(sup) = graph.superclass_of(cur) {
            stack.push(sup);
        }
        for n in &cur.interfaces {
            if let Some(i) = graph.get(n) {
                stack.push(i);
            }
        }
    }
    out.sort_by(|a, b| type_name_sort(a, b));
    out
}

fn print_all_interfaces(page: &mut Page, target: &TypeEntity) {
    let list = all_interfaces(page.graph, target);
    let label = if target.is_interface() {
        "All superinterfaces"
    } else {
        "All implemented interfaces"
    };
    print_plain_class_list(page, label, &list);
}

fn print_known_subclasses(page: &mut Page, target: &TypeEntity) {
    if target.is_interface() {
        return;
    }
    let graph = page.graph;
    let index = page.index;
    let mut list: Vec<&TypeEntity> = graph
        .types()
        .filter(|t| {
            index.is_documented_type(&t.qualified_name)
                && t.superclass.as_deref() == Some(target.qualified_name.as_str())
        })
        .collect();
    list.sort_by(|a, b| type_name_sort(a, b));
    print_plain_class_list(page, "Known direct subclasses", &list);
}

fn print_known_implementing(page: &mut Page, target: &TypeEntity, interfaces: bool) {
    if !target.is_interface() {
        return;
    }
    let graph = page.graph;
    let index = page.index;
    let mut list: Vec<&TypeEntity> = graph
        .types()
        .filter(|t| {
            t.is_interface() == interfaces
                && index.is_documented_type(&t.qualified_name)
                && t.interfaces.iter().any(|n| n == &target.qualified_name)
        })
        .collect();
    list.sort_by(|a, b| type_name_sort(a, b));
    let label = if interfaces {
        "Known direct subinterfaces"
    } else {
        "Known direct implementing classes"
    };
    print_plain_class_list(page, label, &list);
}

fn print_plain_class_list(page: &mut Page, label: &str, list: &[&TypeEntity]) {
    if list.is_empty() {
        return;
    }
    page.push(&format!("<dt>{label}:</dt><dd>"));
    for (i, t) in list.iter().enumerate() {
        if i > 0 {
            page.push(", ");
        }
        let link = page.class_link(&t.qualified_name);
        page.push(&link);
    }
    page.line("</dd>");
}

fn field_table(page: &mut Page, title: &str, rows: &[&ResolvedMember], enum_constants: bool) -> bool {
    if rows.is_empty() {
        return false;
    }
    page.line("<div class=\"summary-item\">");
    page.push(&format!("<h5>{title}</h5>\n"));
    page.line("<table>");

    let count = rows.len();
    let mut started_externals = false;
    for (i, row) in rows.iter().enumerate() {
        let inherited = row.is_inherited();
        if row.is_external() {
            if !started_externals {
                page.push(&format!(
                    "<tr class=\"inherited toggle\" onclick=\"toggleExt(this)\"><td colspan=\"2\">Show all inherited fields ({} more)</td></tr>\n",
                    count - i
                ));
                page.push("<tr class=\"inherited ext sep hide\">");
                started_externals = true;
            } else {
                page.push("<tr class=\"inherited ext hide\">");
            }
        } else if inherited {
            page.push("<tr class=\"inherited\">");
        } else {
            page.push("<tr>");
        }

        if !enum_constants {
            page.line("<td class=\"mods\">");
            page.push("<code>");
            let mods = member_mods(row.member);
            if !mods.is_empty() {
                page.push(&mods);
                page.push(" ");
            }
            if let Some(ty) = &row.member.ty {
                page.push(&escape(ty));
            }
            page.line("</code></td>");
        }

        page.push("<td>");
        let anchor = member_anchor(row.member);
        if row.is_external() {
            page.push(&format!(
                "<code><span class=\"name\"><a class=\"extern\">{}</a></span>",
                escape(&row.member.name)
            ));
        } else if inherited {
            let href = page.links.to_type(row.owner);
            page.push(&format!(
                "<code><span class=\"name\"><a href=\"{}#{}\">{}</a></span>",
                href,
                anchor,
                escape(&row.member.name)
            ));
        } else {
            page.push(&format!(
                "<code><span class=\"name\"><a href=\"#{}\">{}</a></span>",
                anchor,
                escape(&row.member.name)
            ));
        }
        page.push("</code>\n");

        if row.member.deprecated {
            page.push("<br/><span class=\"depr\">Deprecated</span>");
        } else if inherited {
            let owner_link = page.class_link(&row.owner.qualified_name);
            page.push(&format!("<br/>Inherited from <code>{owner_link}</code>."));
        } else if let Some(doc) = &row.member.doc {
            page.push("<br/>");
            page.push(&escape(first_sentence(doc)));
        }
        page.line("</td></tr>");
    }
    page.line("</table>");
    page.line("</div>");
    true
}

fn method_table(page: &mut Page, target: &TypeEntity, title: &str, rows: &[&ResolvedMember]) -> bool {
    if rows.is_empty() {
        return false;
    }
    page.line("<div class=\"summary-item\">");
    page.push(&format!("<h5>{title}</h5>\n"));
    page.line("<table>");

    // Interface declarations surface as abstract on a class page.
    let mods: Vec<String> = rows
        .iter()
        .map(|r| {
            let mut m = member_mods(r.member);
            if r.owner.is_interface()
                && !target.is_interface()
                && !r.member.is_static
                && !r.member.is_abstract
            {
                m = if m.is_empty() { "abstract".to_string() } else { format!("abstract {m}") };
            }
            m
        })
        .collect();
    let has_mods = rows
        .iter()
        .zip(&mods)
        .any(|(r, m)| r.member.kind == MemberKind::Method || !m.is_empty());

    let count = rows.len();
    let mut started_externals = false;
    for (i, row) in rows.iter().enumerate() {
        let inherited = row.is_inherited();
        let default_ctor = row.member.kind == MemberKind::Constructor
            && target.is_default_constructor(row.member);
        if row.is_external() {
            if !started_externals {
                page.push(&format!(
                    "<tr class=\"inherited toggle\" onclick=\"toggleExt(this)\"><td colspan=\"2\">Show all inherited methods ({} more)</td></tr>\n",
                    count - i
                ));
                page.push("<tr class=\"inherited ext sep hide\">");
                started_externals = true;
            } else {
                page.push("<tr class=\"inherited ext hide\">");
            }
        } else if inherited {
            page.push("<tr class=\"inherited\">");
        } else {
            page.push("<tr>");
        }

        if has_mods {
            page.line("<td class=\"mods\">");
            page.push("<code>");
            if !mods[i].is_empty() {
                page.push(&mods[i]);
                page.push(" ");
            }
            if let Some(ret) = &row.member.returns {
                page.push(&escape(ret));
            }
            page.line("</code></td>");
        }

        page.push("<td>");
        let anchor = member_anchor(row.member);
        if row.is_external() || default_ctor {
            page.push(&format!(
                "<code><span class=\"name\"><a class=\"extern\">{}</a></span> (",
                escape(&row.member.name)
            ));
        } else if inherited {
            let href = page.links.to_type(row.owner);
            page.push(&format!(
                "<code><span class=\"name\"><a href=\"{}#{}\">{}</a></span> (",
                href,
                anchor,
                escape(&row.member.name)
            ));
        } else {
            page.push(&format!(
                "<code><span class=\"name\"><a href=\"#{}\">{}</a></span> (",
                anchor,
                escape(&row.member.name)
            ));
        }
        push_params(page, row.member, false, row.is_external());
        page.push(")</code>\n");

        if row.member.deprecated {
            page.push("<br/><span class=\"depr\">Deprecated</span>");
        } else if default_ctor {
            page.push("<br/>Default constructor.");
        } else if inherited {
            let owner_link = page.class_link(&row.owner.qualified_name);
            page.push(&format!("<br/>Inherited from <code>{owner_link}</code>."));
        } else {
            // A declaration with no text of its own borrows the overridden
            // method's description.
            let doc = row
                .member
                .doc
                .as_deref()
                .or_else(|| row.overrides.and_then(|o| o.member.doc.as_deref()));
            if let Some(doc) = doc {
                page.push("<br/>");
                page.push(&escape(first_sentence(doc)));
            }
        }
        page.line("</td></tr>");
    }
    page.line("</table>");
    page.line("</div>");
    true
}

fn push_params(page: &mut Page, member: &MemberEntity, multiline: bool, skip_names: bool) {
    if member.params.is_empty() {
        return;
    }
    if multiline {
        page.push("\n");
    }
    let last = member.params.len() - 1;
    for (i, p) in member.params.iter().enumerate() {
        if multiline {
            page.push("\t");
        } else if i > 0 {
            page.push(", ");
        }
        page.push(&escape(&p.ty));
        if !skip_names {
            page.push(" ");
            page.push(&escape(&p.name));
        }
        if multiline {
            page.push(if i < last { ",\n" } else { "\n" });
        }
    }
}

fn field_details(page: &mut Page, fld: &MemberEntity) {
    let anchor = member_anchor(fld);
    page.line("<div class=\"member\">");
    page.push(&format!(
        "<h3><a class=\"alink\" id=\"{0}\" href=\"#{0}\">{1}</a></h3>\n",
        anchor,
        escape(&fld.name)
    ));

    page.push("<pre>public");
    let mods = member_mods(fld);
    if !mods.is_empty() {
        page.push(" ");
        page.push(&mods);
    }
    if let Some(ty) = &fld.ty {
        page.push(" ");
        page.push(&escape(ty));
    }
    page.push(&format!(" <span class=\"name\">{}</span>", escape(&fld.name)));
    if let Some(val) = &fld.constant_value {
        page.push(" = ");
        page.push(&escape(val));
    }
    page.line(";</pre>");

    page.since_line(fld.since.as_deref());
    page.deprecated_block(fld.deprecated);
    page.comment_par(fld.doc.as_deref());
    page.line("</div>");
}

fn method_details(page: &mut Page, met: &MemberEntity, overridden: Option<MemberRef>) {
    let anchor = member_anchor(met);
    page.line("<div class=\"member\">");
    page.push(&format!(
        "<h3><a class=\"alink\" id=\"{0}\" href=\"#{0}\">{1}</a></h3>\n",
        anchor,
        escape(&met.name)
    ));

    page.push("<pre>public");
    let mods = member_mods(met);
    if !mods.is_empty() {
        page.push(" ");
        page.push(&mods);
    }
    if let Some(ret) = &met.returns {
        page.push(" ");
        page.push(&escape(ret));
    }
    page.push(&format!(" <span class=\"name\">{}</span> (", escape(&met.name)));
    push_params(page, met, true, false);
    page.line(");</pre>");

    page.since_line(met.since.as_deref());

    if let Some(over) = overridden {
        let verb = if over.member.is_abstract || over.owner.is_interface() {
            "Implements"
        } else {
            "Overrides"
        };
        let link = page.member_link(over.owner, over.member, false);
        page.push(&format!("<p class=\"overrides\">{verb} <code>{link}</code>."));
        if met.doc.is_none() && over.member.doc.is_some() {
            page.push(" Copied description:");
        }
        page.line("</p>");
    }

    page.deprecated_block(met.deprecated);
    let doc = met
        .doc
        .as_deref()
        .or_else(|| overridden.and_then(|o| o.member.doc.as_deref()));
    page.comment_par(doc);
    page.line("</div>");
}
