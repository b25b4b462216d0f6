//! An indent-tracking string builder for emitted C++ source.

/// Accumulates emitted lines with a tracked indent level, so generator
/// functions never hand-roll whitespace.
pub struct Writer {
    buf: String,
    indent: usize,
}

impl Writer {
    pub fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        for _ in 0..self.indent {
            self.buf.push_str("    ");
        }
        self.buf.push_str(text);
        self.buf.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.buf.push('\n');
        self
    }

    pub fn open_brace(&mut self, header: &str) -> &mut Self {
        self.line(&format!("{header} {{"));
        self.indent += 1;
        self
    }

    pub fn close_brace(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self.line("}")
    }

    pub fn indent(&mut self) -> &mut Self {
        self.indent += 1;
        self
    }

    pub fn dedent(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        self
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_accumulate_in_order() {
        let mut w = Writer::new();
        w.line("a").line("b");
        assert_eq!(w.finish(), "a\nb\n");
    }

    #[test]
    fn braces_track_indent() {
        let mut w = Writer::new();
        w.open_brace("void f()").line("return;").close_brace();
        assert_eq!(w.finish(), "void f() {\n    return;\n}\n");
    }
}
