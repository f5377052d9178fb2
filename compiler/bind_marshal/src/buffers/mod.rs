//! Output buffers for emitted code fragments.
//!
//! A [`CodeBuffer`] keeps lines together with their nesting depth instead of
//! pre-rendered indentation, so a fragment produced for a nested element can
//! be spliced into an enclosing loop body and re-indented on render.

/// One emitted line at a nesting depth.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Line {
    depth: usize,
    text: String,
}

/// An ordered sequence of indented lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodeBuffer {
    lines: Vec<Line>,
    indent: usize,
}

impl CodeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a line at the current indentation level.
    pub fn writeln(&mut self, text: impl Into<String>) {
        self.lines.push(Line {
            depth: self.indent,
            text: text.into(),
        });
    }

    pub fn indent(&mut self) {
        self.indent += 1;
    }

    pub fn dedent(&mut self) {
        debug_assert!(self.indent > 0, "dedent called with zero indent");
        self.indent = self.indent.saturating_sub(1);
    }

    /// Write `{` and indent.
    pub fn open_brace(&mut self) {
        self.writeln("{");
        self.indent();
    }

    /// Dedent and write `}`.
    pub fn close_brace(&mut self) {
        self.dedent();
        self.writeln("}");
    }

    /// Move every line of `other` into this buffer, nested under the
    /// current indentation level.
    pub fn append(&mut self, other: CodeBuffer) {
        let base = self.indent;
        self.lines.extend(other.lines.into_iter().map(|line| Line {
            depth: base + line.depth,
            text: line.text,
        }));
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Line texts without indentation.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }

    /// Render with `width` spaces per level, one line per `\n`.
    pub fn render(&self, width: usize) -> String {
        let mut out = String::new();
        for line in &self.lines {
            for _ in 0..line.depth * width {
                out.push(' ');
            }
            out.push_str(&line.text);
            out.push('\n');
        }
        out
    }
}

/// The three fragments a type mapping produces for one call site.
///
/// `setup` runs before the foreign call, `return_expr` is the single
/// expression substituted at the use site, `cleanup` runs after the call
/// in the order written.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarshalBuffers {
    pub setup: CodeBuffer,
    pub return_expr: String,
    pub cleanup: CodeBuffer,
}

impl MarshalBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// All three fragments empty.
    pub fn is_empty(&self) -> bool {
        self.setup.is_empty() && self.return_expr.is_empty() && self.cleanup.is_empty()
    }

    /// Append a completed set of fragments.
    ///
    /// Setup and cleanup lines are appended; the return expression is
    /// extended, so a prefix written earlier (`*`) is kept in front.
    pub fn commit(&mut self, staged: MarshalBuffers) {
        self.setup.append(staged.setup);
        self.return_expr.push_str(&staged.return_expr);
        self.cleanup.append(staged.cleanup);
    }
}

#[cfg(test)]
mod tests;
