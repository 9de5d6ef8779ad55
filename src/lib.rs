//! # costered
//!
//! A responsive style cascade and CSS generation engine for block content.
//!
//! ## Features
//!
//! - Per-breakpoint style records (desktop, tablet, mobile) with a narrow-to-wide
//!   cascade for reads and breakpoint-scoped writes
//! - Normalisation of either wire shape (property maps or declaration lists)
//! - CSS grid template, area and placement shorthand codecs
//! - CSS rendering with media queries and per-node-type selector strengthening
//! - Content-addressed stylesheet files that are only rewritten on change
//!
//! ## Quick Start
//!
//! ```
//! use costered::{Config, CascadeWriter, CssRenderer, Breakpoint};
//! use costered::style::{ReadOptions, StyleRecord, get};
//!
//! let config = Config::default();
//! let record = StyleRecord::new().with_id("hero");
//!
//! let record = CascadeWriter::new(Breakpoint::Desktop, &config).set(&record, "width", "80rem");
//! let record = CascadeWriter::new(Breakpoint::Tablet, &config).set(&record, "width", "60rem");
//!
//! // Mobile has no value of its own and inherits from tablet
//! let width = get(&record, "width", ReadOptions::cascade(Breakpoint::Mobile));
//! assert_eq!(width.and_then(|v| v.as_str()), Some("60rem"));
//! assert!(get(&record, "width", ReadOptions::raw(Breakpoint::Mobile)).is_none());
//!
//! let css = CssRenderer::new(&config).render(&record, "core/group");
//! assert!(css.contains("@media (min-width: 783px) and (max-width: 1024px)"));
//! ```
//!
//! ## Compiling Stylesheets
//!
//! ```no_run
//! use costered::{Config, CssRenderer, JsonContentSource, StylesheetCompiler, rebuild_all};
//!
//! let config = Config::load("costered.json").unwrap();
//! let source = JsonContentSource::load("site.json").unwrap();
//! let processed = rebuild_all(
//!     &source,
//!     &CssRenderer::new(&config),
//!     &StylesheetCompiler::new(&config),
//! );
//! println!("{processed} nodes processed");
//! ```

pub mod compiler;
pub mod config;
pub mod error;
pub mod grid;
pub mod rebuild;
pub mod render;
pub mod style;

pub use compiler::{CompiledStylesheet, RenderContext, Scope, StylesheetCompiler};
pub use config::{Breakpoints, Config};
pub use error::{Error, Result};
pub use rebuild::{
    Block, ContentNode, ContentSource, JsonContentSource, NodeStatus, collect_block_styles,
    rebuild_all, rebuild_node,
};
pub use render::{CssRenderer, RuleTargets};
pub use style::{
    Breakpoint, BreakpointBucket, CascadeWriter, StyleDeclaration, StyleRecord, StyleValue,
    ensure_shape,
};
