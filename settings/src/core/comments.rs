//! Comment preservation for top-level YAML keys.
//!
//! The YAML serializer knows nothing about comments, so a write works in two
//! passes over plain line lists:
//!
//! 1. [`collect_comment_blocks`] scans the file as it is on disk and records
//!    each block of `#` lines that sits directly on top of a `key:` line.
//! 2. [`attach_comments`] walks the freshly serialized document and puts a
//!    blank separator plus the recorded block back above each top-level key.
//!
//! Only top-level keys carry comments. A block that is not immediately
//! followed by a `key:` line (a blank line in between, a comment at the end
//! of the file) is dropped.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Key on the line right after a comment block: everything up to the first colon.
static COMMENTED_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.+?):").expect("valid commented key regex"));

/// Unindented `key:` line in serialized output.
static TOP_LEVEL_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\S+):.*$").expect("valid top-level key regex"));

/// One comment block and the key it sits on top of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentBlock {
    pub key: String,
    pub lines: Vec<String>,
    /// The original `key: value` line the block was attached to.
    pub key_line: String,
}

/// First pass: record every comment block that directly precedes a key line.
///
/// Comment lines keep their text with trailing whitespace trimmed.
pub fn collect_comment_blocks<S: AsRef<str>>(lines: &[S]) -> Vec<CommentBlock> {
    let mut blocks = Vec::new();
    let mut pending: Vec<String> = Vec::new();
    for (idx, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        if !is_comment(line) {
            continue;
        }
        pending.push(line.trim_end().to_string());
        let Some(next) = lines.get(idx + 1).map(|next| -> &str { next.as_ref() }) else {
            debug!(lines = pending.len(), "comment block at end of file dropped");
            pending.clear();
            continue;
        };
        if is_comment(next) {
            continue;
        }
        match COMMENTED_KEY_RE.captures(next) {
            Some(caps) => blocks.push(CommentBlock {
                key: caps[1].to_string(),
                lines: std::mem::take(&mut pending),
                key_line: next.to_string(),
            }),
            None => {
                debug!(
                    lines = pending.len(),
                    next, "comment block not followed by a key dropped"
                );
                pending.clear();
            }
        }
    }
    blocks
}

/// Index blocks by key. A later block for the same key replaces an earlier one.
pub fn comment_lookup(blocks: Vec<CommentBlock>) -> HashMap<String, Vec<String>> {
    blocks
        .into_iter()
        .map(|block| (block.key, block.lines))
        .collect()
}

/// Second pass: insert a blank line and the recorded block above every
/// top-level key in `serialized`.
///
/// Each block is used at most once, so the same key text showing up again
/// later in the document gets a separator but no second copy of its comment.
pub fn attach_comments<S: AsRef<str>>(
    serialized: &[S],
    mut comments: HashMap<String, Vec<String>>,
) -> Vec<String> {
    let mut out = Vec::with_capacity(serialized.len() * 2);
    for line in serialized {
        let line = line.as_ref();
        if let Some(caps) = TOP_LEVEL_KEY_RE.captures(line) {
            out.push(String::new());
            if let Some(block) = comments.remove(&caps[1]) {
                out.extend(block);
            }
        }
        out.push(line.to_string());
    }
    if !comments.is_empty() {
        let mut keys: Vec<&String> = comments.keys().collect();
        keys.sort();
        debug!(?keys, "comments for keys no longer present were dropped");
    }
    out
}

/// Render `serialized` with the comment blocks found in `original`.
///
/// The leading separator produced by the first key is dropped and the
/// result always ends with a newline.
pub fn render_with_comments(original: &str, serialized: &str) -> String {
    let original_lines: Vec<&str> = original.lines().collect();
    let serialized_lines: Vec<&str> = serialized.lines().collect();
    let comments = comment_lookup(collect_comment_blocks(&original_lines));
    let joined = attach_comments(&serialized_lines, comments).join("\n");
    let mut rendered = match joined.strip_prefix('\n') {
        Some(rest) => rest.to_string(),
        None => joined,
    };
    rendered.push('\n');
    rendered
}

fn is_comment(line: &str) -> bool {
    line.starts_with('#')
}
