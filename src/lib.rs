//! Terminal console for a WireMock UI admin API
//!
//! Browse and edit REST, GraphQL and SOAP stubs, drive scenarios and
//! recording, read the request journal, and import or export stub sets.

pub mod actions;
pub mod api;
pub mod app;
pub mod config;
pub mod draft;
pub mod editor;
pub mod error;
pub mod execute;
pub mod forms;
pub mod journal;
pub mod listing;
pub mod logging;
pub mod model;
pub mod state;
pub mod store;
pub mod tasks;
pub mod transfer;
pub mod types;
pub mod ui;
pub mod validate;
