//! UI-independent browsing logic.
//!
//! - `controller`: the `Browser` state machine (season → races → race detail)
//! - `table`: the `Table`/`Cell` model handed to front-ends
//! - `views`: builders for the races, qualifying and results tables

pub mod controller;
pub mod table;
pub mod views;

pub use controller::{Action, Browser, Dialog, Effect, ViewState, FETCH_FAILED_MESSAGE};
pub use table::{Cell, LinkTarget, Table};
