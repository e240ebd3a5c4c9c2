//! Automatic sidebar navigation trees for static documentation sites.
//!
//! `sidenav` walks a documentation root on the local filesystem and produces
//! an ordered tree of [`NavNode`]s for a site theme layer to render. A
//! directory holding an index document becomes a leaf entry; a directory
//! holding subdirectories becomes a group, recursively. The tree is recomputed
//! fresh from the filesystem on every composition, with no hidden state.
pub mod config;
pub mod error;
pub mod nav;

pub use config::Config;
pub use error::SidenavError;
pub use nav::{NavNode, compose};
