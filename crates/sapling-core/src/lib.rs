//! Sapling Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Sapling tree
//! diagram crates. It includes:
//!
//! - **Tree**: The labeled, ordered tree model ([`tree::Tree`], [`tree::Node`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Draw**: Text and stroke styling plus text measurement ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod tree;
