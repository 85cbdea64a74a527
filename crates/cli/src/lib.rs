mod inspect;
mod list;
mod schema;
mod view;

use clap::{Parser, Subcommand, ValueEnum};
use lightscope_api::{MethodKind, ParameterKind, ProjectionKind};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "lightscope",
    version,
    about = "Inspect the annotations light elements expose for analysed declarations",
    long_about = "Lightscope projects resolved declarations onto the fields, methods and \
                  parameters editor tooling sees, and attributes each source annotation to the \
                  artifact its use-site target selects. This tool loads a JSON snapshot of an \
                  analysed program and prints the result."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the projected annotations and modifiers of one declaration
    Inspect {
        /// Snapshot file produced by the analyser
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
        /// Numeric id of the declaration
        #[arg(value_name = "DECLARATION_ID")]
        declaration: u32,
        /// Projection to inspect. Defaults to the one the declaration's kind
        /// and resolved descriptor imply.
        #[arg(long = "as", value_enum)]
        projection: Option<ProjectionArg>,
        /// JSON file overriding annotation names and default targets
        #[arg(long, value_name = "CONFIG")]
        config: Option<PathBuf>,
    },
    /// List declarations and projections recorded in a snapshot
    List {
        #[arg(value_name = "SNAPSHOT")]
        snapshot: PathBuf,
    },
    /// Print the JSON schema of the snapshot format
    Schema,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ProjectionArg {
    Class,
    AnnotationClass,
    Field,
    EnumConstant,
    Constructor,
    Getter,
    Setter,
    Method,
    Parameter,
    SetterParameter,
    ConstructorParameter,
}

impl From<ProjectionArg> for ProjectionKind {
    fn from(arg: ProjectionArg) -> Self {
        match arg {
            ProjectionArg::Class => ProjectionKind::CLASS,
            ProjectionArg::AnnotationClass => ProjectionKind::ANNOTATION_CLASS,
            ProjectionArg::Field => ProjectionKind::FIELD,
            ProjectionArg::EnumConstant => ProjectionKind::ENUM_CONSTANT,
            ProjectionArg::Constructor => ProjectionKind::Method(MethodKind::Constructor),
            ProjectionArg::Getter => ProjectionKind::Method(MethodKind::Getter),
            ProjectionArg::Setter => ProjectionKind::Method(MethodKind::Setter),
            ProjectionArg::Method => ProjectionKind::Method(MethodKind::Ordinary),
            ProjectionArg::Parameter => ProjectionKind::Parameter(ParameterKind::Ordinary),
            ProjectionArg::SetterParameter => ProjectionKind::Parameter(ParameterKind::Setter),
            ProjectionArg::ConstructorParameter => {
                ProjectionKind::Parameter(ParameterKind::Constructor)
            }
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = match lightscope_core::logging::init_logging("cli", false) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("warning: {e}");
            None
        }
    };

    match cli.command {
        Commands::Inspect {
            snapshot,
            declaration,
            projection,
            config,
        } => inspect::run(snapshot, declaration, projection, config),
        Commands::List { snapshot } => list::run(snapshot),
        Commands::Schema => schema::run(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_inspect_parses_projection() {
        let cli = Cli::try_parse_from([
            "lightscope",
            "inspect",
            "snapshot.json",
            "7",
            "--as",
            "setter-parameter",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect {
                declaration,
                projection,
                ..
            } => {
                assert_eq!(declaration, 7);
                assert_eq!(
                    ProjectionKind::from(projection.unwrap()),
                    ProjectionKind::Parameter(ParameterKind::Setter)
                );
            }
            _ => panic!("expected inspect"),
        }
    }

    #[test]
    fn test_inspect_defaults_projection() {
        let cli = Cli::try_parse_from(["lightscope", "inspect", "snapshot.json", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Inspect {
                projection: None,
                config: None,
                ..
            }
        ));
    }
}
