//! Code region detection
//!
//! Fenced code blocks and inline code spans hold examples, not instructions, so construct
//! matches inside them are discarded. Regions are computed in a single pass over the text.

use std::ops::Range;

/// Minimum backtick run that opens a fence
const FENCE_MIN_TICKS: usize = 3;

/// How a region was delimited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    /// Triple-backtick block
    Fenced,
    /// Backtick span within a line
    Inline,
}

/// One code region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRegion {
    /// Byte range, end exclusive
    pub range: Range<usize>,
    /// Delimiter kind
    pub kind: CodeKind,
}

/// Sorted, disjoint byte ranges covered by code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeRegions {
    regions: Vec<CodeRegion>,
}

impl CodeRegions {
    /// Scan `text` for fenced blocks and inline spans
    ///
    /// - A fence opens on a line starting (after indentation) with three or more backticks
    ///   and closes on a line holding at least as many backticks and nothing else. The
    ///   region covers both fence lines.
    /// - An unterminated fence extends to the end of the text.
    /// - Outside fences, a run of N backticks opens an inline span closed by the next run
    ///   of exactly N backticks on the same line. An unmatched run is literal text.
    /// - Backticks inside an open fence never start inline spans.
    #[must_use]
    pub fn scan(text: &str) -> Self {
        let mut regions = Vec::new();
        let mut open_fence: Option<(usize, usize)> = None;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_start = offset;
            offset += line.len();

            let trimmed = line.trim_start_matches([' ', '\t']);
            let ticks = trimmed.bytes().take_while(|b| *b == b'`').count();
            let rest = &trimmed[ticks..];

            match open_fence {
                Some((start, open_ticks)) => {
                    if ticks >= open_ticks && rest.trim().is_empty() {
                        regions.push(CodeRegion {
                            range: start..offset,
                            kind: CodeKind::Fenced,
                        });
                        open_fence = None;
                    }
                }
                None if ticks >= FENCE_MIN_TICKS && !rest.contains('`') => {
                    open_fence = Some((line_start, ticks));
                }
                None => scan_inline(line, line_start, &mut regions),
            }
        }

        if let Some((start, _)) = open_fence {
            regions.push(CodeRegion {
                range: start..text.len(),
                kind: CodeKind::Fenced,
            });
        }

        Self { regions }
    }

    /// The computed regions, in text order
    #[must_use]
    pub fn regions(&self) -> &[CodeRegion] {
        &self.regions
    }

    /// Whether no code was found
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Whether byte offset `pos` lies inside code
    #[must_use]
    pub fn contains(&self, pos: usize) -> bool {
        let idx = self.regions.partition_point(|r| r.range.end <= pos);
        self.regions.get(idx).is_some_and(|r| r.range.start <= pos)
    }

    /// Whether byte offset `pos` lies inside a fenced block
    #[must_use]
    pub fn in_fence(&self, pos: usize) -> bool {
        let idx = self.regions.partition_point(|r| r.range.end <= pos);
        self.regions[idx..]
            .iter()
            .take_while(|r| r.range.start <= pos)
            .any(|r| r.kind == CodeKind::Fenced)
    }

    /// Whether `span` shares at least one byte with code
    #[must_use]
    pub fn intersects(&self, span: Range<usize>) -> bool {
        self.overlapping(span).next().is_some()
    }

    /// Whether a match over `span` must be discarded
    ///
    /// Any overlap with a fenced block excludes the match, as does any partial overlap
    /// with an inline span. An inline span lying wholly inside the match (a backticked
    /// tool name in "Use the `Read` tool") does not.
    #[must_use]
    pub fn excludes(&self, span: Range<usize>) -> bool {
        self.overlapping(span.clone()).any(|r| {
            r.kind == CodeKind::Fenced || r.range.start < span.start || r.range.end > span.end
        })
    }

    fn overlapping(&self, span: Range<usize>) -> impl Iterator<Item = &CodeRegion> {
        let idx = self.regions.partition_point(|r| r.range.end <= span.start);
        let end = span.end.max(span.start + 1);
        self.regions[idx..]
            .iter()
            .take_while(move |r| r.range.start < end)
    }
}

fn scan_inline(line: &str, base: usize, regions: &mut Vec<CodeRegion>) {
    let bytes = line.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let open_start = i;
        i = run_end(bytes, i);
        let open_len = i - open_start;

        let mut j = i;
        while j < bytes.len() {
            if bytes[j] == b'`' {
                let close_start = j;
                j = run_end(bytes, j);
                if j - close_start == open_len {
                    regions.push(CodeRegion {
                        range: base + open_start..base + j,
                        kind: CodeKind::Inline,
                    });
                    i = j;
                    break;
                }
            } else {
                j += 1;
            }
        }
    }
}

fn run_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i] == b'`' {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn covered<'a>(text: &'a str, regions: &CodeRegions) -> Vec<&'a str> {
        regions.regions().iter().map(|r| &text[r.range.clone()]).collect()
    }

    #[test]
    fn test_no_code() {
        let regions = CodeRegions::scan("plain text\nwith no code\n");
        assert!(regions.is_empty());
        assert!(!regions.contains(0));
        assert!(CodeRegions::scan("").is_empty());
    }

    #[test]
    fn test_fenced_block() {
        let text = "before\n```rust\nlet x = 1;\n```\nafter\n";
        let regions = CodeRegions::scan(text);

        assert_eq!(covered(text, &regions), ["```rust\nlet x = 1;\n```\n"]);
        assert!(!regions.contains(text.find("before").unwrap()));
        assert!(regions.contains(text.find("let x").unwrap()));
        assert!(!regions.contains(text.find("after").unwrap()));
    }

    #[test]
    fn test_unterminated_fence_runs_to_end() {
        let text = "intro\n```\nspawn a new agent\nmore";
        let regions = CodeRegions::scan(text);

        assert_eq!(regions.regions().len(), 1);
        assert_eq!(regions.regions()[0].range, 6..text.len());
        assert_eq!(regions.regions()[0].kind, CodeKind::Fenced);
        assert!(regions.contains(text.len() - 1));
    }

    #[test]
    fn test_backticks_inside_fence_are_not_inline() {
        let text = "```\nuse `Read` here\n```\n`after`\n";
        let regions = CodeRegions::scan(text);

        assert_eq!(covered(text, &regions), ["```\nuse `Read` here\n```\n", "`after`"]);
    }

    #[test]
    fn test_longer_fence_needs_longer_close() {
        let text = "````\n```\ninner\n```\n````\nout\n";
        let regions = CodeRegions::scan(text);

        assert_eq!(covered(text, &regions), ["````\n```\ninner\n```\n````\n"]);
    }

    #[test]
    fn test_inline_spans() {
        let text = "Run `npm test` then ``a ` b`` done";
        let regions = CodeRegions::scan(text);

        assert_eq!(covered(text, &regions), ["`npm test`", "``a ` b``"]);
    }

    #[test]
    fn test_unmatched_backtick_is_literal() {
        let text = "it`s fine\nspawn a new agent `here`\n";
        let regions = CodeRegions::scan(text);

        assert_eq!(covered(text, &regions), ["`here`"]);
    }

    #[test]
    fn test_inline_spans_do_not_cross_lines() {
        let text = "open ` here\nclose ` there\n";
        assert!(CodeRegions::scan(text).is_empty());
    }

    #[test]
    fn test_intersects_partial_overlap() {
        let text = "abc `code` def";
        let regions = CodeRegions::scan(text);

        assert!(regions.intersects(0..5));
        assert!(regions.intersects(9..12));
        assert!(!regions.intersects(0..4));
        assert!(!regions.intersects(10..14));
    }

    #[test]
    fn test_excludes_enclosed_inline_span_only_when_partial() {
        let text = "Use the `Read` tool or `spawn a new agent`";
        let regions = CodeRegions::scan(text);

        // whole phrase encloses the inline span
        assert!(!regions.excludes(0..18));
        // phrase inside the span
        let inner = text.find("spawn").unwrap();
        assert!(regions.excludes(inner..inner + 17));
        // straddles the closing backtick
        assert!(regions.excludes(10..16));
    }

    #[test]
    fn test_in_fence_ignores_inline_spans() {
        let text = "`inline` text\n```\nfenced\n```\n";
        let regions = CodeRegions::scan(text);

        assert!(regions.contains(0));
        assert!(!regions.in_fence(0));
        assert!(regions.in_fence(text.find("fenced").unwrap()));
    }

    #[test]
    fn test_excludes_any_fence_overlap() {
        let text = "spawn
```
code
```
";
        let regions = CodeRegions::scan(text);

        assert!(regions.excludes(0..text.len()));
        assert!(!regions.excludes(0..5));
    }

    #[test]
    fn test_indented_fence() {
        let text = "- item\n  ```bash\n  cargo test\n  ```\n";
        let regions = CodeRegions::scan(text);

        assert!(regions.contains(text.find("cargo").unwrap()));
        assert!(!regions.contains(0));
    }
}
