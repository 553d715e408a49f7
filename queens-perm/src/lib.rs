#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod cache;
mod enumerate;
mod error;

pub use cache::{PermutationResult, PermutationStore, PermutationStoreConfig};
pub use enumerate::enumerate;
pub use error::PermError;
