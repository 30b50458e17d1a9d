//! Structured markup for widget presentation trees.
//!
//! Widgets never interpolate data into markup strings.  They build a [`Node`]
//! tree instead, and serialisation escapes every text and attribute value on
//! the way out.  Only [`Node::Raw`] (used for trusted stylesheets) bypasses
//! escaping.

pub mod node;
pub mod scope;

pub use node::{el, ElementNode, Node};
pub use scope::ShadowRoot;
