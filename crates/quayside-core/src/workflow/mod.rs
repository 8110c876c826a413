//! Workflow orchestration for Quayside

mod publish;

pub use publish::*;
