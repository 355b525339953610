//! HTTP handlers for entity CRUD and API docs.

pub mod docs;
pub mod entity;
