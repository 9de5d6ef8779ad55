//! Stylesheet compilation for one render pass.
//!
//! A [`RenderContext`] collects CSS fragments while a content node renders.
//! When the pass ends, [`StylesheetCompiler::flush`] drains the context into a
//! content-addressed file under `<uploads>/costered/`:
//!
//! ```text
//! post-<id>-<hash12>.css    one node's styles
//! global-<hash12>.css       site-wide styles
//! ```
//!
//! A file is only rewritten when its content changes, and older files of the
//! same scope are removed afterwards. Recompiling unchanged input touches
//! nothing.

mod persist;

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};

use persist::HASH_PREFIX_LEN;

// ============================================================================
// Render context
// ============================================================================

/// Ordered, de-duplicated CSS fragments for one render pass.
///
/// ```
/// use costered::RenderContext;
///
/// let mut ctx = RenderContext::new();
/// ctx.push("a { color: red; }\n");
/// ctx.push("a { color: red; }");
/// ctx.push("   ");
/// assert_eq!(ctx.len(), 1);
/// assert_eq!(ctx.drain(), "a { color: red; }\n");
/// assert!(ctx.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct RenderContext {
    fragments: Vec<String>,
    seen: HashSet<String>,
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new pass, discarding anything collected so far.
    pub fn reset(&mut self) {
        self.fragments.clear();
        self.seen.clear();
    }

    /// Add a fragment. Blank and already-seen fragments are ignored.
    ///
    /// Returns `true` if the fragment was added.
    pub fn push(&mut self, css: impl Into<String>) -> bool {
        let css = css.into();
        let css = css.trim_end();
        if css.trim_start().is_empty() || self.seen.contains(css) {
            return false;
        }
        self.seen.insert(css.to_string());
        self.fragments.push(css.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// The collected CSS, fragments separated by a blank line.
    pub fn css(&self) -> String {
        if self.fragments.is_empty() {
            return String::new();
        }
        let mut css = self.fragments.join("\n\n");
        css.push('\n');
        css
    }

    /// Take the collected CSS and reset the context.
    pub fn drain(&mut self) -> String {
        let css = self.css();
        self.reset();
        css
    }
}

// ============================================================================
// Scopes and results
// ============================================================================

/// Which file family a stylesheet belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scope {
    /// Styles of one content node.
    Node(String),
    /// Site-wide styles.
    Global,
}

impl Scope {
    pub fn node(id: impl fmt::Display) -> Self {
        Scope::Node(id.to_string())
    }

    /// File name prefix shared by every stylesheet of this scope.
    ///
    /// Node ids may only contain ASCII letters, digits, `-` and `_`.
    pub fn file_prefix(&self) -> Result<String> {
        match self {
            Scope::Global => Ok("global-".to_string()),
            Scope::Node(id) => {
                let valid = !id.is_empty()
                    && id
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_');
                if valid {
                    Ok(format!("post-{id}-"))
                } else {
                    Err(Error::InvalidScope(id.clone()))
                }
            }
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Node(id) => write!(f, "post {id}"),
            Scope::Global => f.write_str("global"),
        }
    }
}

/// A stylesheet that is present on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledStylesheet {
    pub css: String,
    pub path: PathBuf,
    pub url: String,
    /// Full SHA-1 of `css` as 40 hex characters; the file name carries its
    /// first 12. Used where an MD5-style content digest would go, so hashes
    /// differ from MD5-named files but stay deterministic.
    pub hash: String,
}

impl CompiledStylesheet {
    /// The cache-busting URL (`<url>?ver=<hash>`).
    pub fn versioned_url(&self) -> String {
        format!("{}?ver={}", self.url, self.hash)
    }

    /// A `<link>` element that loads this stylesheet.
    pub fn link_tag(&self) -> String {
        let handle = self
            .path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .map(|stem| stem.rsplit_once('-').map_or(stem, |(scope, _)| scope))
            .unwrap_or("costered");
        format!(
            "<link rel=\"stylesheet\" id=\"costered-{handle}-css\" href=\"{}\" media=\"all\" />",
            self.versioned_url()
        )
    }
}

// ============================================================================
// Compiler
// ============================================================================

/// Writes render passes to content-addressed files.
#[derive(Debug, Clone)]
pub struct StylesheetCompiler {
    uploads_dir: PathBuf,
    out_dir: PathBuf,
    base_url: String,
}

impl StylesheetCompiler {
    pub fn new(config: &Config) -> Self {
        Self {
            uploads_dir: config.uploads_dir.clone(),
            out_dir: config.output_dir(),
            base_url: config.output_url(),
        }
    }

    /// Directory compiled files are written to.
    pub fn output_dir(&self) -> &std::path::Path {
        &self.out_dir
    }

    /// Drain `ctx` and persist its CSS for `scope`.
    ///
    /// Returns `None` when there is nothing to write or the file could not be
    /// written; the context is drained either way.
    pub fn flush(&self, ctx: &mut RenderContext, scope: &Scope) -> Option<CompiledStylesheet> {
        let css = ctx.drain();
        self.compile(&css, scope)
    }

    /// Persist `css` for `scope`, logging instead of failing.
    pub fn compile(&self, css: &str, scope: &Scope) -> Option<CompiledStylesheet> {
        match self.try_compile(css, scope) {
            Ok(compiled) => compiled,
            Err(e) => {
                tracing::warn!("Could not compile stylesheet for {scope}: {e}");
                None
            }
        }
    }

    /// Persist `css` for `scope`.
    ///
    /// `Ok(None)` means the input was empty. Writing is skipped when the
    /// target already holds identical content.
    pub fn try_compile(&self, css: &str, scope: &Scope) -> Result<Option<CompiledStylesheet>> {
        if css.trim().is_empty() {
            tracing::debug!("No CSS for {scope}, skipping");
            return Ok(None);
        }

        let prefix = scope.file_prefix()?;
        if !self.uploads_dir.is_dir() {
            return Err(Error::MissingDirectory(self.uploads_dir.clone()));
        }
        fs::create_dir_all(&self.out_dir)?;

        let hash = persist::content_hash(css.as_bytes());
        let filename = format!("{prefix}{}.css", &hash[..HASH_PREFIX_LEN]);
        let path = self.out_dir.join(&filename);

        if persist::needs_write(&path, &hash) {
            persist::write_atomic(&path, css.as_bytes())?;
            tracing::info!("Wrote {}", path.display());
        } else {
            tracing::debug!("{} is up to date", path.display());
        }

        let removed = persist::remove_stale(&self.out_dir, &prefix, &filename);
        if removed > 0 {
            tracing::debug!("Removed {removed} stale stylesheet(s) for {scope}");
        }

        Ok(Some(CompiledStylesheet {
            css: css.to_string(),
            url: format!("{}/{filename}", self.base_url),
            path,
            hash,
        }))
    }
}
