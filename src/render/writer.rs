//! Indent-aware CSS text builder.

use std::fmt::Write;

use crate::style::StyleDeclaration;

const INDENT: &str = "    ";

/// Builds pretty-printed CSS with four spaces per nesting level.
#[derive(Debug, Default)]
pub(crate) struct CssWriter {
    buf: String,
    depth: usize,
}

impl CssWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn indent(&mut self) {
        for _ in 0..self.depth {
            self.buf.push_str(INDENT);
        }
    }

    /// Open a rule; selectors are comma-joined one per line.
    pub(crate) fn open_rule<S: AsRef<str>>(&mut self, selectors: &[S]) {
        for (i, selector) in selectors.iter().enumerate() {
            if i > 0 {
                self.buf.push_str(",\n");
            }
            self.indent();
            self.buf.push_str(selector.as_ref());
        }
        self.buf.push_str(" {\n");
        self.depth += 1;
    }

    /// Open an at-rule block such as `@media (...)`.
    pub(crate) fn open_at_rule(&mut self, prelude: &str) {
        self.indent();
        self.buf.push_str(prelude);
        self.buf.push_str(" {\n");
        self.depth += 1;
    }

    pub(crate) fn declaration(&mut self, decl: &StyleDeclaration) {
        self.indent();
        let important = if decl.important { " !important" } else { "" };
        // Writing to a String cannot fail
        let _ = writeln!(self.buf, "{}: {}{};", decl.key(), decl.value, important);
    }

    pub(crate) fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.indent();
        self.buf.push_str("}\n");
    }

    /// Separate two blocks at the current level.
    pub(crate) fn blank_line(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn finish(self) -> String {
        self.buf
    }
}
