//! Batch regeneration of compiled stylesheets.
//!
//! A [`ContentSource`] lists content nodes and renders one node's CSS into a
//! [`RenderContext`]. [`rebuild_all`] runs a render pass per eligible node and
//! flushes each pass to its own stylesheet. Nodes that fail to render are
//! skipped; a partial rebuild is a normal outcome.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::compiler::{CompiledStylesheet, RenderContext, Scope, StylesheetCompiler};
use crate::error::Result;
use crate::render::CssRenderer;

/// Publication state of a content node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodeStatus {
    #[default]
    Publish,
    Future,
    Draft,
    Pending,
    Private,
    Inherit,
    Trash,
    AutoDraft,
}

impl NodeStatus {
    /// Trashed and auto-draft nodes never get a stylesheet.
    pub fn is_eligible(self) -> bool {
        !matches!(self, NodeStatus::Trash | NodeStatus::AutoDraft)
    }
}

/// One block in a node's content tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Node type, e.g. `core/group`.
    pub name: String,
    #[serde(default)]
    pub attrs: Value,
    #[serde(default, rename = "innerBlocks", alias = "inner")]
    pub inner: Vec<Block>,
}

impl Block {
    pub fn new(name: impl Into<String>, attrs: Value) -> Self {
        Self {
            name: name.into(),
            attrs,
            inner: Vec::new(),
        }
    }

    pub fn with_inner(mut self, inner: Vec<Block>) -> Self {
        self.inner = inner;
        self
    }
}

/// A content node whose blocks carry style records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    pub id: u64,
    #[serde(default)]
    pub status: NodeStatus,
    #[serde(default)]
    pub blocks: Vec<Block>,
}

impl ContentNode {
    pub fn new(id: u64, status: NodeStatus) -> Self {
        Self {
            id,
            status,
            blocks: Vec::new(),
        }
    }

    pub fn with_blocks(mut self, blocks: Vec<Block>) -> Self {
        self.blocks = blocks;
        self
    }

    pub fn scope(&self) -> Scope {
        Scope::node(self.id)
    }
}

/// Where content nodes come from.
pub trait ContentSource {
    /// All nodes, eligible or not.
    fn nodes(&self) -> &[ContentNode];

    /// Run a node's render path, feeding generated CSS into `ctx`.
    ///
    /// The default walks the node's block tree.
    fn render(
        &self,
        node: &ContentNode,
        renderer: &CssRenderer<'_>,
        ctx: &mut RenderContext,
    ) -> Result<()> {
        collect_block_styles(&node.blocks, renderer, ctx);
        Ok(())
    }
}

/// Render every block in `blocks` (depth first, parents before children)
/// into `ctx`. Returns the number of fragments added.
pub fn collect_block_styles(
    blocks: &[Block],
    renderer: &CssRenderer<'_>,
    ctx: &mut RenderContext,
) -> usize {
    let mut added = 0;
    for block in blocks {
        if ctx.push(renderer.render_attributes(&block.attrs, &block.name)) {
            added += 1;
        }
        added += collect_block_styles(&block.inner, renderer, ctx);
    }
    added
}

/// Run one render pass for `node` and flush it.
///
/// `None` means the node produced no stylesheet, either because it had no
/// styles or because rendering or writing failed.
pub fn rebuild_node<S: ContentSource + ?Sized>(
    source: &S,
    node: &ContentNode,
    renderer: &CssRenderer<'_>,
    compiler: &StylesheetCompiler,
    ctx: &mut RenderContext,
) -> Option<CompiledStylesheet> {
    ctx.reset();
    if let Err(e) = source.render(node, renderer, ctx) {
        tracing::debug!("Skipping node {}: {e}", node.id);
        ctx.reset();
        return None;
    }
    compiler.flush(ctx, &node.scope())
}

/// Regenerate the stylesheet of every eligible node.
///
/// Returns the number of nodes processed, which counts nodes whose pass
/// produced no file.
pub fn rebuild_all<S: ContentSource + ?Sized>(
    source: &S,
    renderer: &CssRenderer<'_>,
    compiler: &StylesheetCompiler,
) -> usize {
    let mut ctx = RenderContext::new();
    let mut processed = 0;
    let mut written = 0;

    for node in source.nodes().iter().filter(|n| n.status.is_eligible()) {
        if rebuild_node(source, node, renderer, compiler, &mut ctx).is_some() {
            written += 1;
        }
        processed += 1;
    }

    tracing::info!("Rebuilt {processed} node(s), {written} stylesheet(s) present");
    processed
}

// ============================================================================
// JSON source
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct SiteFile {
    #[serde(default)]
    nodes: Vec<ContentNode>,
}

/// Content nodes read from a JSON document of the form
/// `{ "nodes": [{ "id": 1, "status": "publish", "blocks": [...] }] }`.
#[derive(Debug, Clone, Default)]
pub struct JsonContentSource {
    nodes: Vec<ContentNode>,
}

impl JsonContentSource {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let site: SiteFile = serde_json::from_str(json)?;
        Ok(Self::new(site.nodes))
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = Self::from_json_str(&std::fs::read_to_string(path)?)?;
        tracing::debug!("Loaded {} node(s) from {}", source.nodes.len(), path.display());
        Ok(source)
    }

    /// Look up a node by id.
    pub fn node(&self, id: u64) -> Option<&ContentNode> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

impl ContentSource for JsonContentSource {
    fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn styled(id: &str, width: &str) -> Value {
        json!({
            "costeredId": id,
            "costered": { "desktop": { "styles": { "width": width } } }
        })
    }

    #[test]
    fn test_status_eligibility() {
        assert!(NodeStatus::Publish.is_eligible());
        assert!(NodeStatus::Draft.is_eligible());
        assert!(NodeStatus::Private.is_eligible());
        assert!(!NodeStatus::Trash.is_eligible());
        assert!(!NodeStatus::AutoDraft.is_eligible());
    }

    #[test]
    fn test_collect_block_styles_walks_tree() {
        let config = Config::default();
        let renderer = CssRenderer::new(&config);
        let blocks = vec![
            Block::new("core/group", styled("outer", "10px")).with_inner(vec![
                Block::new("core/paragraph", json!({})),
                Block::new("core/group", styled("inner", "5px")),
            ]),
            Block::new("core/group", styled("outer", "10px")),
        ];

        let mut ctx = RenderContext::new();
        assert_eq!(collect_block_styles(&blocks, &renderer, &mut ctx), 2);
        let css = ctx.css();
        let outer = css.find("\"outer\"").unwrap();
        let inner = css.find("\"inner\"").unwrap();
        assert!(outer < inner);
    }

    #[test]
    fn test_json_source() {
        let source = JsonContentSource::from_json_str(
            r#"{ "nodes": [
                { "id": 1, "status": "publish", "blocks": [
                    { "name": "core/group", "attrs": {}, "innerBlocks": [] }
                ] },
                { "id": 2, "status": "auto-draft" },
                { "id": 3 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(source.nodes().len(), 3);
        assert_eq!(source.node(2).unwrap().status, NodeStatus::AutoDraft);
        assert_eq!(source.node(3).unwrap().status, NodeStatus::Publish);
        assert_eq!(source.node(1).unwrap().blocks[0].name, "core/group");
        assert!(source.node(9).is_none());
    }
}
