use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::commands::config;
use crate::core::DocIndex;
use crate::model::loader;
use crate::render::{self, RenderOptions};

pub struct GenerateArgs {
    pub model: String,
    pub output: String,
    pub title: Option<String>,
    pub css: Option<String>,
    pub js: Option<String>,
    pub date: bool,
    pub parallelism: Option<usize>,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let model_path = Path::new(&args.model);
    let output_path = Path::new(&args.output);
    let config = config::load().unwrap_or_default();

    info!("Generating documentation from: {}", model_path.display());
    info!("Output directory: {}", output_path.display());

    let spinner_style = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{prefix:.bold.dim} {spinner} {wide_msg}")?;

    // Phase 1: Load the type model
    let load_pb = ProgressBar::new_spinner();
    load_pb.set_style(spinner_style.clone());
    load_pb.set_prefix("[1/4]");
    load_pb.set_message("Loading type model...");
    load_pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let graph = loader::load(model_path)
        .with_context(|| format!("failed to load type model from {}", model_path.display()))?;

    load_pb.finish_with_message(format!(
        "Loaded {} types across {} namespaces",
        graph.type_count(),
        graph.namespaces().count()
    ));

    // Phase 2: Seal the documented-set index
    let index_pb = ProgressBar::new_spinner();
    index_pb.set_style(spinner_style.clone());
    index_pb.set_prefix("[2/4]");
    index_pb.set_message("Indexing documented types...");
    index_pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let index = DocIndex::build(&graph);

    index_pb.finish_with_message(format!(
        "Indexed {} documented types in {} namespaces",
        index.type_count(),
        index.namespace_count()
    ));

    // Phase 3: Resolve and render pages
    let render_pb = ProgressBar::new_spinner();
    render_pb.set_style(spinner_style.clone());
    render_pb.set_prefix("[3/4]");
    render_pb.set_message("Rendering pages...");
    render_pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let opts = RenderOptions {
        title: args
            .title
            .or(config.output.title)
            .unwrap_or_else(|| "API Reference".to_string()),
        date: args.date || config.output.date,
    };
    let parallelism = args.parallelism.or(config.generate.parallelism).unwrap_or(4);

    let graph = Arc::new(graph);
    let index = Arc::new(index);
    let opts = Arc::new(opts);
    let summary = render::write_pages(
        Arc::clone(&graph),
        Arc::clone(&index),
        Arc::clone(&opts),
        output_path,
        parallelism,
    )
    .await?;

    render_pb.finish_with_message(format!(
        "Rendered {} type pages and {} namespace pages",
        summary.pages, summary.namespaces
    ));

    // Phase 4: Shared assets
    let assets_pb = ProgressBar::new_spinner();
    assets_pb.set_style(spinner_style);
    assets_pb.set_prefix("[4/4]");
    assets_pb.set_message("Writing shared assets...");
    assets_pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let css = args.css.or(config.output.css);
    let js = args.js.or(config.output.js);
    render::write_assets(output_path, css.as_deref(), js.as_deref())?;

    assets_pb.finish_with_message(format!("Output written to {}", output_path.display()));

    if !summary.failures.is_empty() {
        anyhow::bail!(
            "{} of {} pages failed to render",
            summary.failures.len(),
            summary.failures.len() + summary.pages
        );
    }

    info!("✅ Documentation generated!");
    Ok(())
}
