//! Motivos (reasons) and their JSON file store.

pub mod model;
pub mod store;

pub use model::{seed_reasons, Reason};
pub use store::ReasonStore;
