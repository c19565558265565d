//! Splitting of raw argument text into segments.
//!
//! Tags are delimited by `<` and `>`; inside a tag, steps are separated by
//! `.` and may carry a `[parameter]`. Parameters are themselves arguments and
//! are compiled recursively. A `<` that never closes is ordinary text.
//!
//! All delimiters are ASCII, so scanning works on bytes; multi-byte UTF-8
//! sequences never contain a delimiter byte.

use std::collections::HashMap;

use quill_foundation::{Error, Result};

use crate::argument::{Argument, Segment};
use crate::chain::{TagChain, TagStep};

/// Deepest nesting of tags inside tag parameters.
pub(crate) const MAX_NESTING: usize = 128;

/// Splits argument text into literal and tag segments.
pub(crate) struct Splitter<'src> {
    /// Text being split.
    source: &'src str,
    /// Byte offset of `source` within the outermost argument, for errors.
    offset: usize,
    /// How many tag parameters enclose `source`.
    depth: usize,
    /// Closing `>` for every `<` in `source` that opens a tag.
    tag_ends: HashMap<usize, usize>,
}

impl<'src> Splitter<'src> {
    pub(crate) fn new(source: &'src str, offset: usize, depth: usize) -> Self {
        Self {
            source,
            offset,
            depth,
            tag_ends: tag_ends(source.as_bytes()),
        }
    }

    /// Splits the whole source into segments.
    pub(crate) fn split(&self) -> Result<Vec<Segment>> {
        let bytes = self.source.as_bytes();
        let mut segments = Vec::new();
        let mut literal_start = 0;
        let mut i = 0;

        while i < bytes.len() {
            if bytes[i] == b'<' {
                if let Some(&end) = self.tag_ends.get(&i) {
                    let body = &self.source[i + 1..end];
                    if !body.trim().is_empty() {
                        if literal_start < i {
                            segments.push(Segment::Literal(
                                self.source[literal_start..i].to_string(),
                            ));
                        }
                        segments.push(Segment::Tag(self.parse_chain(body, i + 1)?));
                        literal_start = end + 1;
                    }
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }
        if literal_start < bytes.len() {
            segments.push(Segment::Literal(self.source[literal_start..].to_string()));
        }
        Ok(segments)
    }

    /// Parses the body of one tag (text between `<` and `>`).
    fn parse_chain(&self, body: &str, body_offset: usize) -> Result<TagChain> {
        let bytes = body.as_bytes();
        let position = |local: usize| self.offset + body_offset + local;
        let mut steps = Vec::new();
        let mut i = 0;

        loop {
            let name_start = i;
            while i < bytes.len() && bytes[i] != b'[' && bytes[i] != b'.' {
                match bytes[i] {
                    b']' => return Err(Error::parse("unbalanced ']' in tag", position(i))),
                    b'<' | b'>' => {
                        return Err(Error::parse(
                            "tag names cannot contain '<' or '>'",
                            position(i),
                        ));
                    }
                    _ => i += 1,
                }
            }
            let name = body[name_start..i].trim().to_lowercase();

            let mut param = None;
            if i < bytes.len() && bytes[i] == b'[' {
                let close = self
                    .find_bracket_end(bytes, body_offset, i)
                    .ok_or_else(|| Error::parse("unclosed '[' in tag", position(i)))?;
                if self.depth >= MAX_NESTING {
                    return Err(Error::parse("tags nested too deeply", position(i)));
                }
                let inner = &body[i + 1..close];
                param = Some(Argument::compile_at(
                    inner,
                    position(i + 1),
                    self.depth + 1,
                )?);
                i = close + 1;
                if i < bytes.len() && bytes[i] != b'.' {
                    return Err(Error::parse("expected '.' after ']'", position(i)));
                }
            }

            let step = TagStep { name, param };
            if step.name.is_empty() && !(steps.is_empty() && step.is_definition()) {
                return Err(Error::parse("empty tag name", position(name_start)));
            }
            steps.push(step);

            if i >= bytes.len() {
                break;
            }
            // Skip the '.' separator.
            i += 1;
            if i >= bytes.len() {
                return Err(Error::parse("tag ends with '.'", position(i)));
            }
        }

        Ok(TagChain::new(body, steps))
    }

    /// Finds the `]` matching the `[` at `open` in a tag body that starts at
    /// `base` in the source. Nested tags are skipped whole.
    fn find_bracket_end(&self, bytes: &[u8], base: usize, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        let mut i = open;
        while i < bytes.len() {
            match bytes[i] {
                b'<' => {
                    if let Some(&end) = self.tag_ends.get(&(base + i)) {
                        i = end - base + 1;
                        continue;
                    }
                }
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
            i += 1;
        }
        None
    }
}

/// Pairs each `<` that opens a tag with the `>` closing it, in one pass.
///
/// Every open tag counts its own brackets, and `>` inside brackets does not
/// close. A `<` still open at the end of input is plain text, as is every
/// `<` enclosing it.
fn tag_ends(bytes: &[u8]) -> HashMap<usize, usize> {
    let mut ends = HashMap::new();
    // (position of '<', bracket depth) for each tag still open.
    let mut open: Vec<(usize, usize)> = Vec::new();
    for (i, &byte) in bytes.iter().enumerate() {
        match byte {
            b'<' => open.push((i, 0)),
            b'[' => {
                if let Some((_, brackets)) = open.last_mut() {
                    *brackets += 1;
                }
            }
            b']' => {
                if let Some((_, brackets)) = open.last_mut() {
                    *brackets = brackets.saturating_sub(1);
                }
            }
            b'>' => {
                if let Some(&(start, 0)) = open.last() {
                    open.pop();
                    ends.insert(start, i);
                }
            }
            _ => {}
        }
    }
    ends
}
