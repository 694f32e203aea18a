//! Site-level structures built from the page collection.
//!
//! Everything here is a pure transformation over the frozen [`Pages`]
//! list: navigation menus, the post listing, URL normalization, and the
//! layout that consumes them.
//!
//! [`Pages`]: crate::content::meta::Pages

pub mod nav;
pub mod posts;
pub mod render;
pub mod url;
