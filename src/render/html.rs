//! Shared HTML emission helpers
//!
//! Page chrome, escaping, anchors, and the link emitters every page kind
//! shares. Links are resolved against the documented-set index: documented
//! targets get a relative `href`, everything else degrades to an unlinked
//! `extern` label so a missing namespace or type never produces a dead link.

use std::cmp::Ordering;

use crate::core::{DocIndex, PageLinks, ResolvedMember};
use crate::model::{MemberEntity, MemberKind, Namespace, TypeEntity, TypeGraph};

use super::RenderOptions;

/// One page being rendered: an output buffer plus the link computer
/// anchored at the page's namespace.
pub struct Page<'a> {
    pub graph: &'a TypeGraph,
    pub index: &'a DocIndex,
    pub opts: &'a RenderOptions,
    pub links: PageLinks,
    pub buf: String,
}

impl<'a> Page<'a> {
    pub fn new(
        graph: &'a TypeGraph,
        index: &'a DocIndex,
        opts: &'a RenderOptions,
        namespace: Namespace,
    ) -> Self {
        Page {
            graph,
            index,
            opts,
            links: PageLinks::new(namespace),
            buf: String::new(),
        }
    }

    pub fn push(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn finish(self) -> String {
        self.buf
    }

    /// Page header, nav trail, and title. `current_file` is the page's own
    /// file name, used for the self-link on the title.
    pub fn page_start(&mut self, title: &str, current_file: &str, nav: &[String], smaller: bool) {
        let root = self.links.to_root();

        self.push(&format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<title>{}</title>\n",
            escape(title)
        ));
        if self.opts.date {
            self.push(&format!(
                "<meta name=\"date\" content=\"{}\">\n",
                chrono::Local::now().format("%Y-%m-%d")
            ));
        }
        self.line("<meta charset=\"UTF-8\" />");
        self.line("<meta name=\"viewport\" content=\"width=device-width; initial-scale=1.0\" />");
        self.push(&format!(
            "<link rel=\"stylesheet\" href=\"{root}doc.css\" />\n<script src=\"{root}doc.js\"></script>\n",
        ));
        self.line("</head>");

        self.line("<body class=\"bg\">");
        self.line("<button id=\"upBtn\" title=\"Scroll to top\" onclick=\"scrollUp()\">&#129093;</button>");
        self.line("<div class=\"body\"><div class=\"page\">");

        self.push(&format!(
            "<div class=\"nav\">\n<a href=\"{root}index.html\">{}</a>\n",
            escape(&self.opts.title)
        ));
        for link in nav {
            self.push("&#11208; ");
            self.line(link);
        }
        if !nav.is_empty() || title != self.opts.title {
            self.push("&#11208; ");
            self.line(&escape(title));
        }
        self.line("</div>");

        self.push(if smaller { "<h1 class=\"smaller\">" } else { "<h1>" });
        self.push(&format!(
            "<a class=\"toplink\" href=\"{}\">{}</a></h1>\n",
            current_file,
            escape(title).replace('.', ".<wbr/>")
        ));
    }

    pub fn page_end(&mut self) {
        self.line("</div></div></body>\n</html>");
    }

    /// Link to a type by qualified-name reference. Unknown or undocumented
    /// targets render as unlinked `extern` labels.
    pub fn class_link(&mut self, qualified_name: &str) -> String {
        match self.graph.get(qualified_name) {
            Some(t) if self.index.is_documented_type(qualified_name) => {
                let href = self.links.to_type(t);
                format!(
                    "<a href=\"{}\" title=\"{}\">{}</a>",
                    href,
                    escape(qualified_name),
                    escape(&t.name)
                )
            }
            _ => {
                let simple = qualified_name.rsplit('.').next().unwrap_or(qualified_name);
                format!(
                    "<a class=\"extern\" title=\"{}\">{}</a>",
                    escape(qualified_name),
                    escape(simple)
                )
            }
        }
    }

    /// Link to a namespace's index page.
    pub fn namespace_link(&mut self, ns: &Namespace) -> String {
        if self.index.is_documented_namespace(ns) {
            let href = self.links.to_index(ns);
            let label = if ns.is_root() { "(root)" } else { ns.as_str() };
            format!(
                "<a href=\"{}\" title=\"{}\">{}</a>",
                href,
                escape(ns.as_str()),
                escape(label)
            )
        } else {
            format!(
                "<a class=\"extern\" title=\"{}\">{}</a>",
                escape(ns.as_str()),
                escape(ns.as_str())
            )
        }
    }

    /// Link to a member on its owner's page. `same_page` suppresses the
    /// owner prefix and the page part of the href.
    pub fn member_link(
        &mut self,
        owner: &TypeEntity,
        member: &MemberEntity,
        same_page: bool,
    ) -> String {
        let mut title = format!("{}.{}", owner.qualified_name, member.name);
        let mut label = if same_page {
            member.name.clone()
        } else {
            format!("{}.{}", owner.name, member.name)
        };
        if member.kind != MemberKind::Field {
            title.push_str(&member.signature());
            label.push_str(&member.signature());
        }

        if self.index.is_documented_type(&owner.qualified_name) {
            let page = if same_page {
                String::new()
            } else {
                self.links.to_type(owner)
            };
            format!(
                "<a href=\"{}#{}\" title=\"{}\">{}</a>",
                page,
                member_anchor(member),
                escape(&title),
                escape(&label)
            )
        } else {
            format!(
                "<a class=\"extern\" title=\"{}\">{}</a>",
                escape(&title),
                escape(&label)
            )
        }
    }

    pub fn since_line(&mut self, since: Option<&str>) {
        if let Some(since) = since {
            self.push(&format!(
                "<p class=\"since\">Since: {}</p>\n",
                escape(since)
            ));
        }
    }

    pub fn deprecated_block(&mut self, deprecated: bool) {
        if deprecated {
            self.line("<div class=\"depr\"><p><span class=\"depr\">Deprecated.</span></p></div>");
        }
    }

    /// Documentation text as a comment block; blank lines split paragraphs.
    pub fn comment_par(&mut self, doc: Option<&str>) {
        if let Some(doc) = doc {
            let body = escape(doc).replace("\n\n", "</p><p>");
            self.push(&format!("<div class=\"comment\"><p>{body}</p></div>\n"));
        }
    }
}

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// First sentence of a doc text: up to the first period followed by
/// whitespace or end of text.
pub fn first_sentence(doc: &str) -> &str {
    let bytes = doc.as_bytes();
    for (i, _) in doc.match_indices('.') {
        match bytes.get(i + 1) {
            None => return doc,
            Some(b' ') | Some(b'\n') | Some(b'\t') => return &doc[..=i],
            _ => {}
        }
    }
    doc
}

/// In-page anchor for a member: the bare name for fields, name plus erased
/// parameter types for methods and constructors.
pub fn member_anchor(member: &MemberEntity) -> String {
    if member.kind == MemberKind::Field {
        return member.name.clone();
    }
    let mut anchor = member.name.clone();
    for p in &member.params {
        anchor.push('-');
        anchor.push_str(&anchor_type(&p.ty));
    }
    anchor.push('-');
    anchor
}

fn anchor_type(ty: &str) -> String {
    let erased = ty.split('<').next().unwrap_or(ty);
    erased.replace(' ', "").replace("[]", ":A")
}

/// Modifier text shown in summary columns; visibility is implied.
pub fn member_mods(m: &MemberEntity) -> String {
    let mut mods = Vec::new();
    if m.is_abstract {
        mods.push("abstract");
    }
    if m.is_static {
        mods.push("static");
    }
    if m.is_final {
        mods.push("final");
    }
    mods.join(" ")
}

/// Types sort by simple name, owning namespace as the tie-break.
pub fn type_name_sort(a: &TypeEntity, b: &TypeEntity) -> Ordering {
    a.name.cmp(&b.name).then_with(|| a.namespace.cmp(&b.namespace))
}

/// Members with documented owners sort before external ones, then by name.
pub fn member_sort(index: &DocIndex, a: &ResolvedMember, b: &ResolvedMember) -> Ordering {
    index
        .is_documented_type(&b.owner.qualified_name)
        .cmp(&index.is_documented_type(&a.owner.qualified_name))
        .then_with(|| a.member.name.cmp(&b.member.name))
}

/// Method order adds the signature as a final tie-break between overloads.
pub fn method_sort(index: &DocIndex, a: &ResolvedMember, b: &ResolvedMember) -> Ordering {
    member_sort(index, a, b).then_with(|| a.member.signature().cmp(&b.member.signature()))
}
