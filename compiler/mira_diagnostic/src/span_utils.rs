//! Line and column lookup for byte offsets.

use mira_ir::{Position, Span};

/// Pre-computed line start table.
///
/// Built once per source text; every lookup is a binary search over
/// line starts.
///
/// ```
/// use mira_diagnostic::LineOffsetTable;
/// use mira_ir::Position;
///
/// let source = "x: int = 1\necho x";
/// let table = LineOffsetTable::build(source);
/// assert_eq!(table.position(source, 0), Position::new(1, 1));
/// assert_eq!(table.position(source, 16), Position::new(2, 6));
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        for (i, byte) in source.bytes().enumerate() {
            if byte == b'\n' {
                offsets.push(u32::try_from(i + 1).unwrap_or(u32::MAX));
            }
        }
        LineOffsetTable { offsets }
    }

    /// 1-based line containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based line and character column of `offset`.
    pub fn position(&self, source: &str, offset: u32) -> Position {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let end = (offset as usize).min(source.len()).max(line_start);
        let column = source
            .get(line_start..end)
            .map_or(0, |prefix| prefix.chars().count());
        Position::new(line, u32::try_from(column).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Position of the start of `span`.
    #[inline]
    pub fn span_position(&self, source: &str, span: Span) -> Position {
        self.position(source, span.start)
    }

    /// Byte offset where a 1-based line starts.
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a 1-based line without its terminator.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> Option<&'s str> {
        let start = self.line_start_offset(line)? as usize;
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize - 1);
        source
            .get(start..end)
            .map(|text| text.strip_suffix('\r').unwrap_or(text))
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}
