//! UI drawing module
//!
//! This module is organized into focused submodules:
//! - `components`: Header, sidebar, footer, search bar, spinners
//! - `modals`: Scenario state dialog and editor field input
//! - `panels`: One renderer per page
//! - `tabs`: Stub editor (tabs, fields, JSON view, execute response)
//! - `styling`: Color schemes and style constants

mod components;
mod modals;
mod panels;
mod styling;
mod tabs;

pub use components::{render_footer, render_header, render_sidebar, SPINNER};
pub use modals::render_modals;
pub use panels::render_page;
pub use tabs::{render_editor, try_format_json};
