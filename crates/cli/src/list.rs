use crate::view::{DeclarationRow, ProjectionRow};
use lightscope_api::ParentChain;
use lightscope_core::SnapshotModel;
use std::path::PathBuf;
use tabled::{Table, settings::Style};
use tracing::info;

pub fn run(snapshot: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let model = SnapshotModel::load(&snapshot)?;
    let declarations = model.declarations();
    info!(
        "Loaded {} declarations from {}",
        declarations.len(),
        snapshot.display()
    );

    let rows: Vec<DeclarationRow> = declarations
        .iter()
        .map(|d| DeclarationRow::from_declaration(d, model.nearest_origin_kind(d.id)))
        .collect();
    println!("{}", Table::new(&rows).with(Style::psql()));

    let projections: Vec<ProjectionRow> = model.projections().into_iter().map(Into::into).collect();
    if !projections.is_empty() {
        println!(
            "\nCompiled views:\n{}",
            Table::new(&projections).with(Style::psql())
        );
    }
    Ok(())
}
