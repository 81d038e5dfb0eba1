//! Wavelane Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Wavelane loader
//! and renderer. It includes:
//!
//! - **Bricks**: Typed references to the glyphs of a wave skin ([`brick::Brick`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Elements**: The abstract SVG element tree produced by rendering ([`element`] module)
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Semantic**: The normalized diagram description ([`semantic`] module)
//! - **Skins**: Cell metrics and styling of the glyph catalog ([`skin`] module)
//! - **Text**: Font metrics used to size labels ([`text`] module)

pub mod brick;
pub mod color;
pub mod element;
pub mod geometry;
pub mod semantic;
pub mod skin;
pub mod text;
