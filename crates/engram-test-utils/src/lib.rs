//! Test doubles for exercising the Engram dispatcher without a live store.

mod store;

pub use store::{FailingRecordStore, InMemoryRecordStore};
