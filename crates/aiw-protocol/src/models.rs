//! Claude model identifiers accepted in skill frontmatter
//!
//! Claude Code accepts the short aliases (`sonnet`, `opus`, `haiku`), `inherit`, and full
//! model IDs. Anything else is still written out verbatim but flagged as degraded, since
//! Claude Code falls back to the session model when it cannot resolve the value.

// ========================================================================
// ALIASES
// ========================================================================

/// Use the model of the invoking session
pub const INHERIT: &str = "inherit";

/// Latest Sonnet
pub const SONNET: &str = "sonnet";

/// Latest Opus
pub const OPUS: &str = "opus";

/// Latest Haiku
pub const HAIKU: &str = "haiku";

// ========================================================================
// FULL MODEL IDS
// ========================================================================

/// Claude Sonnet 4.5 (September 2025)
pub const CLAUDE_SONNET_4_5_20250929: &str = "claude-sonnet-4-5-20250929";

/// Claude Haiku 4.5 (October 2025)
pub const CLAUDE_HAIKU_4_5_20251001: &str = "claude-haiku-4-5-20251001";

/// Claude Opus 4.1 (August 2025)
pub const CLAUDE_OPUS_4_1_20250805: &str = "claude-opus-4-1-20250805";

/// Claude Opus 4 (May 2025)
pub const CLAUDE_OPUS_4_20250514: &str = "claude-opus-4-20250514";

/// Claude Sonnet 4 (May 2025)
pub const CLAUDE_SONNET_4_20250514: &str = "claude-sonnet-4-20250514";

/// Claude 3.7 Sonnet (February 2025)
pub const CLAUDE_3_7_SONNET_20250219: &str = "claude-3-7-sonnet-20250219";

/// Claude 3.5 Sonnet (October 2024)
pub const CLAUDE_3_5_SONNET_20241022: &str = "claude-3-5-sonnet-20241022";

/// Claude 3.5 Haiku (October 2024)
pub const CLAUDE_3_5_HAIKU_20241022: &str = "claude-3-5-haiku-20241022";

/// Every identifier Claude Code resolves without falling back
pub const KNOWN_MODELS: &[&str] = &[
    INHERIT,
    SONNET,
    OPUS,
    HAIKU,
    CLAUDE_SONNET_4_5_20250929,
    "claude-sonnet-4-5",
    CLAUDE_HAIKU_4_5_20251001,
    "claude-haiku-4-5",
    CLAUDE_OPUS_4_1_20250805,
    "claude-opus-4-1",
    CLAUDE_OPUS_4_20250514,
    "claude-opus-4-0",
    CLAUDE_SONNET_4_20250514,
    "claude-sonnet-4-0",
    CLAUDE_3_7_SONNET_20250219,
    "claude-3-7-sonnet-latest",
    CLAUDE_3_5_SONNET_20241022,
    "claude-3-5-sonnet-latest",
    CLAUDE_3_5_HAIKU_20241022,
    "claude-3-5-haiku-latest",
];

/// Whether Claude Code recognizes a model identifier (case-insensitive)
#[must_use]
pub fn is_known_model(model: &str) -> bool {
    let model = model.trim();
    KNOWN_MODELS.iter().any(|m| m.eq_ignore_ascii_case(model))
}
