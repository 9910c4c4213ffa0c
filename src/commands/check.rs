use anyhow::{Context, Result};
use console::style;
use std::path::Path;
use tracing::info;

use crate::core::{DocIndex, MemberResolver};
use crate::model::{loader, TypeEntity};

pub struct CheckArgs {
    pub model: String,
}

/// Validate a model and resolve every documented type without writing any
/// output. Exits non-zero if the model is malformed or any type fails.
pub async fn run(args: CheckArgs) -> Result<()> {
    let model_path = Path::new(&args.model);
    info!("Checking type model: {}", model_path.display());

    let graph = loader::load(model_path)
        .with_context(|| format!("failed to load type model from {}", model_path.display()))?;
    let index = DocIndex::build(&graph);
    let resolver = MemberResolver::new(&graph, &index);

    let mut documented: Vec<&TypeEntity> = graph
        .types()
        .filter(|t| index.is_documented_type(&t.qualified_name))
        .collect();
    documented.sort_by(|a, b| a.qualified_name.cmp(&b.qualified_name));

    let mut failed = 0;
    let mut fields = 0;
    let mut methods = 0;
    for &t in &documented {
        match resolver.resolve(t) {
            Ok(members) => {
                fields += members.fields.len();
                methods += members.methods.len();
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", style("✗").red(), t.qualified_name, e);
            }
        }
    }

    println!(
        "{} {} documented types in {} namespaces ({} external references)",
        style("✓").green(),
        index.type_count(),
        index.namespace_count(),
        graph.type_count() - index.type_count()
    );
    println!("  {fields} resolved fields, {methods} resolved methods");

    if failed > 0 {
        anyhow::bail!("{failed} type(s) failed to resolve");
    }
    Ok(())
}
