//! Splitting long workflow bodies
//!
//! Cut points, in order of preference: a `##` heading, any heading, the line after a blank
//! line, any line start, a line start inside a fenced block, and finally a hard cut at the
//! character budget. Only the last two fall inside fenced code. Each pick is the latest
//! qualifying point within the budget, so chunks are as large as allowed.
//!
//! A cut inside a fenced block closes the fence at the end of the chunk and reopens it,
//! with the same info string, at the start of the next.

use std::ops::Range;

use aiw_parser::code_regions::{CodeKind, CodeRegions};

/// Split `text` into pieces of at most `budget` characters
///
/// Pieces are trimmed of the newlines around the cut. A budget of zero is treated as one.
pub(crate) fn split(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut chunks = Vec::new();
    let mut rest = text.to_string();

    while rest.chars().count() > budget {
        let (piece, next) = cut_once(&rest, budget);
        if !piece.is_empty() {
            chunks.push(piece);
        }
        rest = next;
    }
    if !rest.trim().is_empty() || chunks.is_empty() {
        chunks.push(rest);
    }
    chunks
}

/// The first chunk of `text` and the text left after it
fn cut_once(text: &str, budget: usize) -> (String, String) {
    let regions = CodeRegions::scan(text);
    let mut cut = find_cut(text, budget, &regions);

    if let Some(fence) = open_fence_at(text, &regions, cut) {
        let close = fence.close();
        let reserve = close.chars().count() + 1;
        // the reopened fence line must leave room for content in the next chunk
        if budget > reserve + fence.open.chars().count() + 1 {
            cut = find_cut(text, budget - reserve, &regions);
            if let Some(fence) = open_fence_at(text, &regions, cut) {
                let piece = format!("{}\n{}", text[..cut].trim_end(), fence.close());
                let next = format!(
                    "{}\n{}",
                    fence.open,
                    text[cut..].trim_start_matches(['\n', '\r'])
                );
                return (piece, next);
            }
        }
    }

    (
        text[..cut].trim_end().to_string(),
        text[cut..].trim_start_matches(['\n', '\r']).to_string(),
    )
}

/// Byte offset in `(0, text.len())` to cut at
fn find_cut(text: &str, budget: usize, regions: &CodeRegions) -> usize {
    let max = text
        .char_indices()
        .nth(budget)
        .map_or(text.len(), |(idx, _)| idx);

    // (line start, line) for every line after the first that starts within budget,
    // outside fences
    let mut lines = Vec::new();
    let mut fenced_lines = Vec::new();
    let mut offset = 0;
    let mut previous_blank = false;
    let mut blank_after = Vec::new();
    for line in text.split_inclusive('\n') {
        if offset > 0 && offset <= max {
            if !regions.in_fence(offset) {
                lines.push((offset, line));
                if previous_blank {
                    blank_after.push(offset);
                }
            } else if open_fence_at(text, regions, offset)
                .is_some_and(|fence| offset < fence.content.end)
            {
                fenced_lines.push(offset);
            }
        }
        previous_blank = line.trim().is_empty();
        offset += line.len();
        if offset > max {
            break;
        }
    }

    let heading = |line: &str, exact_level: Option<usize>| {
        let hashes = line.chars().take_while(|&c| c == '#').count();
        let level_ok = match exact_level {
            Some(level) => hashes == level,
            None => (1..=6).contains(&hashes),
        };
        level_ok && line[hashes..].starts_with([' ', '\t'])
    };

    lines
        .iter()
        .rev()
        .find(|&&(_, line)| heading(line, Some(2)))
        .or_else(|| lines.iter().rev().find(|&&(_, line)| heading(line, None)))
        .map(|&(start, _)| start)
        .or_else(|| blank_after.last().copied())
        .or_else(|| lines.last().map(|&(start, _)| start))
        .or_else(|| fenced_lines.last().copied())
        .unwrap_or_else(|| hard_cut(text, max))
}

/// Cut at `max`, or at the first character boundary after the first character
fn hard_cut(text: &str, max: usize) -> usize {
    if max > 0 {
        return max;
    }
    text.char_indices().nth(1).map_or(text.len(), |(idx, _)| idx)
}

/// A fenced block as needed to close and reopen it
struct Fence<'a> {
    /// Opening line without its line break
    open: &'a str,
    indent: &'a str,
    ticks: usize,
    /// Bytes between the opening and closing lines
    content: Range<usize>,
}

impl Fence<'_> {
    fn close(&self) -> String {
        format!("{}{}", self.indent, "`".repeat(self.ticks))
    }
}

/// The fenced block whose content holds `pos`, past its first content line start
fn open_fence_at<'a>(text: &'a str, regions: &CodeRegions, pos: usize) -> Option<Fence<'a>> {
    let region = regions
        .regions()
        .iter()
        .find(|r| r.kind == CodeKind::Fenced && r.range.contains(&pos))?;
    let block = &text[region.range.clone()];

    let open_line = block.split_inclusive('\n').next().unwrap_or(block);
    let open = open_line.trim_end();
    let marker = open.trim_start_matches([' ', '\t']);
    let indent = &open[..open.len() - marker.len()];
    let ticks = marker.bytes().take_while(|b| *b == b'`').count();

    let without_break = block.strip_suffix('\n').unwrap_or(block);
    let last_start = without_break.rfind('\n').map_or(0, |idx| idx + 1);
    let last = block[last_start..].trim();
    let closed = last_start > 0 && last.len() >= ticks && last.bytes().all(|b| b == b'`');
    let content_end = if closed {
        region.range.start + last_start
    } else {
        region.range.end
    };

    let content = region.range.start + open_line.len()..content_end;
    (content.start < pos && pos <= content.end).then_some(Fence {
        open,
        indent,
        ticks,
        content,
    })
}
