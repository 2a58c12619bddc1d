//! Static image rendering for headless runs.

pub mod svg;

pub use svg::SvgRenderer;
