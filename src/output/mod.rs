//! Writing discovered nodes

mod writer;

pub use writer::{NodeFormat, NodeWriter};
