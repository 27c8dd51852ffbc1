//! mdpad: a markdown notepad built around a small, order-dependent
//! markdown-to-HTML renderer.
//!
//! ```
//! assert_eq!(mdpad::render("**hi**"), "<b>hi</b>");
//! ```

pub mod config;
pub mod editing;
pub mod render;
pub mod session;
pub mod storage;
pub mod store;
pub mod util;

pub use render::{Renderer, render};
pub use session::{Session, SessionError};
