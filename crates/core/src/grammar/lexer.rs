use super::command::Command;

/// One semantic line of a document: not blank and not a `;` comment.
///
/// All text fields borrow from the input; nothing is allocated per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based position in the `\n` split, counting skipped lines.
    pub number: usize,
    /// The whole line with surrounding whitespace removed.
    pub text: &'a str,
    /// First whitespace-delimited token, as written.
    pub keyword: &'a str,
    /// Everything after the keyword, trimmed.
    pub rest: &'a str,
}

impl SourceLine<'_> {
    /// Keyword uppercased, as reported in diagnostics.
    pub fn command_name(&self) -> String {
        self.keyword.to_ascii_uppercase()
    }

    /// The recognized command for this line, if any.
    pub fn command(&self) -> Option<Command> {
        Command::from_keyword(&self.command_name())
    }
}

/// Iterate over the semantic lines of `input`.
///
/// Splits on `\n` and trims each line, so `\r\n` endings behave like `\n`.
pub fn lines(input: &str) -> impl Iterator<Item = SourceLine<'_>> {
    input.split('\n').enumerate().filter_map(|(i, raw)| {
        let text = raw.trim();
        if text.is_empty() || text.starts_with(';') {
            return None;
        }
        let end = text.find(char::is_whitespace).unwrap_or(text.len());
        let (keyword, rest) = text.split_at(end);
        Some(SourceLine {
            number: i + 1,
            text,
            keyword,
            rest: rest.trim(),
        })
    })
}

/// Split the argument text of a positional command.
///
/// Commas and whitespace both separate arguments, except that a bare unit
/// word (`mm`, `inch`) stays attached to the word before it. So
/// `50 mm, 30 mm`, `50mm,30mm` and `50mm 30mm` each yield two arguments.
///
/// One dangling trailing comma is ignored. Interior empty pieces (`1,,2`)
/// are kept as empty arguments so they fail their format check.
pub fn split_args(rest: &str) -> Vec<&str> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Vec::new();
    }

    let mut pieces: Vec<&str> = rest.split(',').collect();
    if pieces.len() > 1 && pieces.last().is_some_and(|p| p.trim().is_empty()) {
        pieces.pop();
    }

    let mut args = Vec::new();
    for piece in pieces {
        let words = word_spans(piece);
        if words.is_empty() {
            args.push("");
            continue;
        }
        let mut merged: Vec<(usize, usize)> = Vec::with_capacity(words.len());
        for (start, end) in words {
            let is_unit = matches!(&piece[start..end], "mm" | "inch");
            match merged.last_mut() {
                Some(prev) if is_unit => prev.1 = end,
                _ => merged.push((start, end)),
            }
        }
        args.extend(merged.into_iter().map(|(start, end)| &piece[start..end]));
    }
    args
}

/// Byte ranges of the whitespace-separated words in `piece`.
fn word_spans(piece: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in piece.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, piece.len()));
    }
    spans
}
