use crate::ProjectionArg;
use crate::view::AnnotationRow;
use lightscope_api::{DeclarationId, DeclarationProvider, LightDeclarationProjection};
use lightscope_core::modifier_list::names;
use lightscope_core::{LightConfig, LightSession, Outcome, SnapshotModel};
use std::path::PathBuf;
use std::sync::Arc;
use tabled::{Table, settings::Style};
use tracing::{info, warn};

const MODIFIERS: [&str; 6] = [
    names::PUBLIC,
    names::PROTECTED,
    names::PRIVATE,
    names::FINAL,
    names::ABSTRACT,
    names::STATIC,
];

pub fn run(
    snapshot: PathBuf,
    declaration: u32,
    projection: Option<ProjectionArg>,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => Outcome::run_catching(|| LightConfig::load(&path))
            .on_failure(|e| warn!("Ignoring config {}: {}", path.display(), e))
            .get_or_else(|_| LightConfig::default()),
        None => LightConfig::default(),
    };

    let model = Arc::new(SnapshotModel::load(&snapshot)?);
    let id = DeclarationId(declaration);
    let decl = model
        .declaration(id)
        .ok_or_else(|| format!("declaration {id} is not in {}", snapshot.display()))?;
    let session = Arc::new(LightSession::from_model(model.clone()).with_config(config));
    let kind = match projection {
        Some(arg) => arg.into(),
        None => session.natural_projection(decl)?,
    };
    let projection = LightDeclarationProjection::new(id, kind);
    info!("Inspecting {} ({})", projection, decl.name);

    let list = session.modifier_list(projection);

    println!("{} `{}`", projection, decl.name);
    let annotations = list.annotations()?;
    if annotations.is_empty() {
        println!("No annotations.");
    } else {
        let rows: Vec<AnnotationRow> = annotations
            .iter()
            .map(AnnotationRow::from_annotation)
            .collect();
        println!("{}", Table::new(&rows).with(Style::psql()));
    }

    let modifiers: Vec<&str> = MODIFIERS
        .into_iter()
        .filter(|m| list.has_modifier_property(m))
        .collect();
    if modifiers.is_empty() {
        println!("modifiers: -");
    } else {
        println!("modifiers: {}", modifiers.join(" "));
    }
    Ok(())
}
