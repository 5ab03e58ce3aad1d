pub mod catalog;
pub mod primitives;
pub mod registry;
pub mod traits;

pub use catalog::{Catalog, FunctionSpec, TerminalSpec};
pub use registry::PrimitiveRegistry;
pub use traits::Primitive;
