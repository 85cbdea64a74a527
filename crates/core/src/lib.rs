pub mod annotation;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod matcher;
pub mod modifier_list;
pub mod outcome;
pub mod projector;
pub mod session;
pub mod snapshot;

pub use annotation::{
    CompiledDelegate, LightAnnotation, NullabilityAnnotation, SourceEntryAnnotation,
};
pub use cache::LightElementCache;
pub use config::LightConfig;
pub use error::{LightscopeError, Result};
pub use modifier_list::{LightModifierList, ModifierSet};
pub use outcome::{Failure, Outcome};
pub use projector::AnnotationProjector;
pub use session::LightSession;
pub use snapshot::{CompiledModifierList, Snapshot, SnapshotModel};
