//! Shared data model.

mod criteria;
mod node;
mod page;

pub use criteria::*;
pub use node::*;
pub use page::*;

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
