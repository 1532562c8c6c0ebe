//! Extract, Transform and Load abstractions
//!
//! Node discovery is modelled as a small pipeline: records are extracted
//! from an upstream document, transformed into [`Node`](crate::Node)s and
//! loaded into a destination such as a file or stdout.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::Transformer;
