mod assets;
mod html;
mod indexes;
mod package_page;
mod type_page;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use futures::stream::{self, StreamExt};
use tracing::{debug, error};

use crate::core::links::NAMESPACE_INDEX_FILE;
use crate::core::DocIndex;
use crate::model::TypeGraph;

pub use assets::write_assets;

/// Presentation settings shared by every page.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Site title shown in the navigation bar.
    pub title: String,
    /// Stamp pages with the generation date. Off by default so regenerated
    /// output stays byte-identical.
    pub date: bool,
}

#[derive(Debug)]
pub struct PageFailure {
    pub type_name: String,
    pub message: String,
}

#[derive(Debug)]
pub struct RenderSummary {
    pub pages: usize,
    pub namespaces: usize,
    pub failures: Vec<PageFailure>,
}

/// Write the whole site: global indexes, namespace pages, and one page per
/// documented type. Type pages only read the sealed graph and write
/// disjoint files, so they fan out across blocking workers; a failed type
/// is recorded and never blocks its siblings.
pub async fn write_pages(
    graph: Arc<TypeGraph>,
    index: Arc<DocIndex>,
    opts: Arc<RenderOptions>,
    out_root: &Path,
    parallelism: usize,
) -> Result<RenderSummary> {
    fs::create_dir_all(out_root)
        .with_context(|| format!("failed to create {}", out_root.display()))?;

    fs::write(
        out_root.join("index.html"),
        indexes::render_namespace_index(&graph, &index, &opts),
    )?;
    fs::write(
        out_root.join(indexes::ALL_TYPES_FILE),
        indexes::render_type_index(&graph, &index, &opts),
    )?;
    fs::write(out_root.join("namespace-list"), indexes::namespace_list(&graph))?;

    let mut namespaces = 0;
    for ns in graph.namespaces() {
        // The global index already occupies index.html at the root; types in
        // the root namespace stay reachable through the type index.
        if ns.name.is_root() {
            continue;
        }
        let dir = ns.name.dir_under(out_root);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
        fs::write(
            dir.join(NAMESPACE_INDEX_FILE),
            package_page::render(&graph, &index, &opts, ns),
        )?;
        namespaces += 1;
    }

    let mut names: Vec<String> = graph
        .types()
        .filter(|t| index.is_documented_type(&t.qualified_name))
        .map(|t| t.qualified_name.clone())
        .collect();
    names.sort();

    let results: Vec<_> = stream::iter(names.into_iter().map(|name| {
        let graph = Arc::clone(&graph);
        let index = Arc::clone(&index);
        let opts = Arc::clone(&opts);
        let out_root = out_root.to_path_buf();
        tokio::task::spawn_blocking(move || {
            write_type_page(&graph, &index, &opts, &out_root, &name)
        })
    }))
    .buffer_unordered(parallelism.max(1))
    .collect()
    .await;

    let mut summary = RenderSummary {
        pages: 0,
        namespaces,
        failures: vec![],
    };
    for res in results {
        match res {
            Ok(Ok(())) => summary.pages += 1,
            Ok(Err(failure)) => {
                error!("Failed to render {}: {}", failure.type_name, failure.message);
                summary.failures.push(failure);
            }
            Err(e) => return Err(e).context("page rendering task panicked"),
        }
    }
    Ok(summary)
}

fn write_type_page(
    graph: &TypeGraph,
    index: &DocIndex,
    opts: &RenderOptions,
    out_root: &Path,
    name: &str,
) -> Result<(), PageFailure> {
    let fail = |message: String| PageFailure {
        type_name: name.to_string(),
        message,
    };

    let t = match graph.get(name) {
        Some(t) => t,
        None => return Err(fail("type missing from the sealed graph".into())),
    };
    let html = type_page::render(graph, index, opts, t).map_err(|e| fail(e.to_string()))?;

    let dir = t.namespace.dir_under(out_root);
    fs::create_dir_all(&dir).map_err(|e| fail(e.to_string()))?;
    fs::write(dir.join(format!("{}.html", t.name)), html).map_err(|e| fail(e.to_string()))?;
    debug!("Wrote page for {}", name);
    Ok(())
}
