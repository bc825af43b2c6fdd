//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color scheme and text styling
//! - `table`: Conversion of core tables into ratatui widgets
//! - `panels`: Home, races, race detail and entity dialogs

pub mod input;
pub mod panels;
pub mod render;
pub mod styles;
pub mod table;
