//! Line-oriented text writer with indentation.

/// Accumulates generated lines at a current indentation level.
///
/// Empty lines are written without trailing whitespace.
#[derive(Debug, Clone)]
pub(crate) struct CodeWriter {
    out: String,
    level: usize,
    width: usize,
}

impl CodeWriter {
    /// Create a writer indenting by `width` spaces per level.
    pub fn new(width: usize) -> Self {
        Self {
            out: String::new(),
            level: 0,
            width,
        }
    }

    /// Write one line at the current indentation.
    pub fn line(&mut self, text: impl AsRef<str>) {
        let text = text.as_ref();
        if !text.is_empty() {
            self.out.push_str(&" ".repeat(self.level * self.width));
            self.out.push_str(text);
        }
        self.out.push('\n');
    }

    /// Write one line at column zero, e.g. a preprocessor directive.
    pub fn raw_line(&mut self, text: impl AsRef<str>) {
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    pub fn blank(&mut self) {
        self.out.push('\n');
    }

    /// Run `f` one level deeper.
    pub fn indented(&mut self, f: impl FnOnce(&mut Self)) {
        self.level += 1;
        f(self);
        self.level -= 1;
    }

    /// Write `{`, the indented body and `}`.
    pub fn block(&mut self, f: impl FnOnce(&mut Self)) {
        self.block_with("}", f);
    }

    /// Like [`CodeWriter::block`] with a custom closing line such as `};`.
    pub fn block_with(&mut self, close: &str, f: impl FnOnce(&mut Self)) {
        self.line("{");
        self.indented(f);
        self.line(close);
    }

    pub fn finish(self) -> String {
        self.out
    }
}
