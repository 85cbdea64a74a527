pub mod error;
pub mod models;
pub mod resolve;

// Re-export commonly used types
pub use error::{ApiError, ApiResult, Cancelled};
pub use models::*;
pub use resolve::{
    CompiledView, CompiledViewProvider, DeclarationProvider, DescriptorResolver, EmptyCompiledView,
    OriginKind, ParentChain,
};
