//! Domain library for the site document service.
//!
//! One JSON site document holds all editable content for the marketing
//! site. This crate provides the document model, the state migrator that
//! keeps old persisted documents loadable, swappable document and asset
//! stores, the reconciler that removes unreferenced uploads, and the sync
//! client coordinating load, cache fallback, and save-on-change.

pub mod assets;
pub mod auth;
pub mod document;
pub mod events;
pub mod reconcile;
pub mod store;
pub mod sync;
