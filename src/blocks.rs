/*!
 * Blank-line block splitting shared by the text codecs.
 */

/// A run of non-blank, trimmed lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Block<'a> {
    /// 1-based line number of the first line
    pub line_number: usize,
    pub lines: Vec<&'a str>,
}

impl<'a> Block<'a> {
    pub fn first(&self) -> &'a str {
        self.lines[0]
    }
}

/// Split source text on blank lines. A leading byte order mark is ignored
/// and both `\n` and `\r\n` endings are accepted.
pub(crate) fn split_blocks(source: &str) -> Vec<Block<'_>> {
    let source = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut blocks = Vec::new();
    let mut current: Option<Block<'_>> = None;

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            blocks.extend(current.take());
            continue;
        }
        current
            .get_or_insert_with(|| Block {
                line_number: idx + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }
    blocks.extend(current);

    blocks
}
