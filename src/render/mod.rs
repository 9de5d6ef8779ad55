//! CSS generation for one node's style record.
//!
//! The record's id becomes an attribute selector (`[data-costered-id="ID"]`).
//! Desktop declarations are emitted at top level, tablet and mobile inside
//! their media queries, so the browser applies the same breakpoint cascade the
//! editor shows.
//!
//! # Selector strengthening
//!
//! Some node types render their visible box on an inner element (a button
//! wrapper around a link, for example). For those, the configuration lists
//! descendant selectors. Margins stay on the wrapper, since only the wrapper
//! controls the outer box; every other declaration moves to the descendants.

mod writer;

use serde_json::Value;

use crate::compiler::RenderContext;
use crate::config::Config;
use crate::style::{Breakpoint, BreakpointBucket, StyleDeclaration, StyleRecord};

use writer::CssWriter;

/// Renders style records to CSS text.
///
/// # Example
///
/// ```
/// use costered::{Config, CssRenderer};
/// use costered::style::{StyleDeclaration, StyleRecord};
///
/// let config = Config::default();
/// let mut record = StyleRecord::new().with_id("a1");
/// record.desktop.styles.push(StyleDeclaration::new("width", "80rem"));
///
/// let css = CssRenderer::new(&config).render(&record, "core/group");
/// assert_eq!(css, "[data-costered-id=\"a1\"] {\n    width: 80rem;\n}\n");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CssRenderer<'a> {
    config: &'a Config,
}

/// Selectors a record's declarations are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTargets {
    pub wrapper: String,
    /// Present when the node type needs strengthening.
    pub strengthened: Option<Vec<String>>,
}

impl<'a> CssRenderer<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// The bare wrapper selector for a scope id.
    pub fn base_selector(&self, id: &str) -> String {
        format!("[data-{}=\"{}\"]", self.config.selector_attribute, id)
    }

    /// Resolve the selectors for a scope id and node type.
    pub fn targets(&self, id: &str, node_type: &str) -> RuleTargets {
        let wrapper = self.base_selector(id);
        let strengthened = self.config.strengthened_selectors(node_type).map(|suffixes| {
            suffixes
                .iter()
                .map(|suffix| format!("{wrapper} {}", suffix.trim()))
                .collect()
        });
        RuleTargets {
            wrapper,
            strengthened,
        }
    }

    /// Render a record. Records without an id or declarations render `""`.
    pub fn render(&self, record: &StyleRecord, node_type: &str) -> String {
        let Some(id) = record.id.as_deref() else {
            return String::new();
        };
        if record.is_empty() {
            return String::new();
        }

        let targets = self.targets(id, node_type);
        let breakpoints = &self.config.breakpoints;
        let mut sections = Vec::with_capacity(3);

        for bp in Breakpoint::ALL {
            let bucket = record.bucket(bp);
            if bucket.is_empty() {
                continue;
            }

            let mut w = CssWriter::new();
            match bp {
                Breakpoint::Desktop => write_rules(&mut w, bucket, &targets),
                Breakpoint::Tablet | Breakpoint::Mobile => {
                    let query = if bp == Breakpoint::Tablet {
                        breakpoints.tablet_query()
                    } else {
                        breakpoints.mobile_query()
                    };
                    w.open_at_rule(&query);
                    write_rules(&mut w, bucket, &targets);
                    w.close();
                }
            }
            sections.push(w.finish());
        }

        sections.join("\n")
    }

    /// Render a node from its raw attribute record.
    pub fn render_attributes(&self, attrs: &Value, node_type: &str) -> String {
        self.render(&StyleRecord::from_attributes(attrs, self.config), node_type)
    }

    /// Render a record and add the result to a render pass.
    pub fn render_into(&self, ctx: &mut RenderContext, record: &StyleRecord, node_type: &str) {
        ctx.push(self.render(record, node_type));
    }
}

fn is_margin(decl: &StyleDeclaration) -> bool {
    decl.key().starts_with("margin")
}

/// Write one bucket's rules at the writer's current depth.
fn write_rules(w: &mut CssWriter, bucket: &BreakpointBucket, targets: &RuleTargets) {
    let Some(strengthened) = &targets.strengthened else {
        write_rule(w, &[targets.wrapper.as_str()], bucket.iter());
        return;
    };

    let (margins, others): (Vec<_>, Vec<_>) = bucket.iter().partition(|d| is_margin(d));

    let wrote_margins = !margins.is_empty();
    if wrote_margins {
        write_rule(w, &[targets.wrapper.as_str()], margins.into_iter());
    }
    if !others.is_empty() {
        if wrote_margins {
            w.blank_line();
        }
        write_rule(w, strengthened.as_slice(), others.into_iter());
    }
}

fn write_rule<'d, S: AsRef<str>>(
    w: &mut CssWriter,
    selectors: &[S],
    decls: impl Iterator<Item = &'d StyleDeclaration>,
) {
    w.open_rule(selectors);
    for decl in decls {
        w.declaration(decl);
    }
    w.close();
}
