pub mod annotation;
pub mod declaration;
pub mod descriptor;
pub mod projection;

pub use annotation::*;
pub use declaration::*;
pub use descriptor::*;
pub use projection::*;
