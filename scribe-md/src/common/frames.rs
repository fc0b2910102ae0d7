//! Frame stack: deferred, indent-scoped output assembly.
//!
//! # The High-Level Concept
//!
//! Text cannot be laid out as soon as it is seen. A list marker or heading prefix is only
//! known once the whole block it belongs to has been collected, and a nested block must land
//! at its parent's indentation plus its own. So output is buffered in [`Frame`]s: entering a
//! structural node pushes one, leaving it pops and *folds* it into finished `(indent, lines)`
//! groups which are handed to the parent frame.
//!
//! # The Algorithm (close)
//!
//! 1. Pop the innermost frame and remember its indent.
//! 2. Walk its fragments in order. Contiguous `Raw` fragments are concatenated and split into
//!    lines (see [`fold_raw_run`]), optionally followed by one blank line, forming a group at
//!    the frame's indent. A `Positioned` fragment flushes the pending run and is re-emitted at
//!    `frame indent + its own indent`.
//! 3. With a first-line prefix, the first group is joined into one logical line, prefixed,
//!    and split so the prefixed line hangs at the parent's indent while the remainder of that
//!    group stays at the group's own indent.
//! 4. An optional wrap transform rewrites the whole group list.
//! 5. The groups are appended to the new innermost frame as `Positioned` fragments.
//!
//! Rendering finishes by folding the root frame and joining every line, prefixed by its
//! group's indent in spaces, with the configured line terminator.

use std::fmt;

/// Finished lines at a fixed indent, relative to the frame that holds them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub indent: usize,
    pub lines: Vec<String>,
}

impl Group {
    pub fn new(indent: usize, lines: Vec<String>) -> Self {
        Group { indent, lines }
    }
}

/// Content buffered in a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Unformatted text still waiting to be split into lines.
    Raw(String),
    /// Lines already folded by a nested frame.
    Positioned(Group),
}

#[derive(Debug, Default)]
struct Frame {
    indent: usize,
    items: Vec<Fragment>,
}

/// Transform applied to the folded groups of a frame before they reach the parent.
pub type WrapFn<'a> = Box<dyn FnOnce(Vec<Group>) -> Vec<Group> + 'a>;

/// How [`FrameStack::close`] folds a frame.
pub struct CloseOptions<'a> {
    pub append_blank_line: bool,
    pub first_line_prefix: Option<&'a str>,
    pub wrap: Option<WrapFn<'a>>,
}

impl<'a> CloseOptions<'a> {
    pub fn new() -> Self {
        CloseOptions {
            append_blank_line: true,
            first_line_prefix: None,
            wrap: None,
        }
    }

    pub fn no_blank_line(mut self) -> Self {
        self.append_blank_line = false;
        self
    }

    pub fn first_line_prefix(mut self, prefix: &'a str) -> Self {
        self.first_line_prefix = Some(prefix);
        self
    }

    pub fn wrap(mut self, wrap: impl FnOnce(Vec<Group>) -> Vec<Group> + 'a) -> Self {
        self.wrap = Some(Box::new(wrap));
        self
    }
}

impl Default for CloseOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CloseOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloseOptions")
            .field("append_blank_line", &self.append_blank_line)
            .field("first_line_prefix", &self.first_line_prefix)
            .field("wrap", &self.wrap.is_some())
            .finish()
    }
}

/// Raised when a close or finish does not match the frames that were opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// `close` with only the root frame left.
    Underflow,
    /// `finish` with frames still open above the root.
    Unclosed(usize),
}

impl fmt::Display for StackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StackError::Underflow => write!(f, "frame stack underflow: no open frame to close"),
            StackError::Unclosed(count) => write!(f, "{count} frame(s) still open at end of pass"),
        }
    }
}

impl std::error::Error for StackError {}

/// Open/close counters, used to check that a pass is balanced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub opened: usize,
    pub closed: usize,
}

/// The buffer stack of one render pass.
///
/// The root frame is held apart from the opened frames, so there is always an innermost frame
/// to emit into and only opened frames can be closed.
#[derive(Debug)]
pub struct FrameStack {
    root: Frame,
    frames: Vec<Frame>,
    stats: FrameStats,
}

impl FrameStack {
    pub fn new() -> Self {
        FrameStack {
            root: Frame::default(),
            frames: Vec::new(),
            stats: FrameStats::default(),
        }
    }

    /// Number of frames, root included.
    pub fn depth(&self) -> usize {
        self.frames.len() + 1
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn open(&mut self, indent: usize) {
        self.frames.push(Frame {
            indent,
            items: Vec::new(),
        });
        self.stats.opened += 1;
    }

    pub fn emit(&mut self, text: impl Into<String>) {
        self.innermost().items.push(Fragment::Raw(text.into()));
    }

    /// Pop the innermost frame and fold it into its parent.
    pub fn close(&mut self, options: CloseOptions<'_>) -> Result<(), StackError> {
        let frame = self.frames.pop().ok_or(StackError::Underflow)?;
        self.stats.closed += 1;

        let mut groups = fold_frame(frame.indent, frame.items, options.append_blank_line);
        if let Some(prefix) = options.first_line_prefix {
            groups = hang_first_line(groups, frame.indent, prefix, options.append_blank_line);
        }
        if let Some(wrap) = options.wrap {
            groups = wrap(groups);
        }

        self.innermost()
            .items
            .extend(groups.into_iter().map(Fragment::Positioned));
        Ok(())
    }

    /// Fold the root frame and join every line with `terminator`.
    pub fn finish(self, terminator: &str) -> Result<String, StackError> {
        if !self.frames.is_empty() {
            return Err(StackError::Unclosed(self.frames.len()));
        }
        let groups = fold_frame(self.root.indent, self.root.items, true);
        Ok(join_groups(&groups, terminator))
    }

    fn innermost(&mut self) -> &mut Frame {
        self.frames.last_mut().unwrap_or(&mut self.root)
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        Self::new()
    }
}

/// Split one concatenated run of raw text into lines.
///
/// Embedded line breaks are authoritative; nothing is re-flowed. An empty run yields no lines.
pub fn fold_raw_run(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

/// Partition a frame's fragments into groups (step 2 of close).
fn fold_frame(indent: usize, items: Vec<Fragment>, append_blank_line: bool) -> Vec<Group> {
    let mut groups = Vec::new();
    let mut pending: Option<String> = None;

    let flush = |pending: &mut Option<String>, groups: &mut Vec<Group>| {
        if let Some(run) = pending.take() {
            let mut lines = fold_raw_run(&run);
            if append_blank_line {
                lines.push(String::new());
            }
            groups.push(Group::new(indent, lines));
        }
    };

    for item in items {
        match item {
            Fragment::Raw(text) => pending.get_or_insert_with(String::new).push_str(&text),
            Fragment::Positioned(group) => {
                flush(&mut pending, &mut groups);
                groups.push(Group::new(indent + group.indent, group.lines));
            }
        }
    }
    flush(&mut pending, &mut groups);
    groups
}

/// Glue `prefix` onto the first group (step 3 of close).
///
/// The first group's non-empty lines become one logical line. The prefixed line is placed at
/// the first group's indent minus the frame indent, so the marker sits in the parent's column
/// while the rest of the group (its trailing blank line, when present) keeps its own indent.
/// No blank line is added when the next group already starts with one, as it does when the
/// first group is itself a hung marker line from a nested item.
fn hang_first_line(
    mut groups: Vec<Group>,
    frame_indent: usize,
    prefix: &str,
    append_blank_line: bool,
) -> Vec<Group> {
    if groups.is_empty() {
        return groups;
    }
    let first = groups.remove(0);
    let joined = first
        .lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let spaced_already = groups
        .first()
        .and_then(|next| next.lines.first())
        .is_some_and(|line| line.is_empty());
    let mut lines = fold_raw_run(&format!("{prefix}{joined}"));
    if append_blank_line && !spaced_already {
        lines.push(String::new());
    }
    let mut lines = lines.into_iter();
    let head: Vec<String> = lines.next().into_iter().collect();
    let rest: Vec<String> = lines.collect();

    let mut result = Vec::with_capacity(groups.len() + 2);
    result.push(Group::new(first.indent.saturating_sub(frame_indent), head));
    if !rest.is_empty() {
        result.push(Group::new(first.indent, rest));
    }
    result.extend(groups);
    result
}

/// Render groups as text. Blank lines carry no indentation.
pub fn join_groups(groups: &[Group], terminator: &str) -> String {
    groups
        .iter()
        .flat_map(|group| {
            group.lines.iter().map(move |line| {
                if line.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", " ".repeat(group.indent), line)
                }
            })
        })
        .collect::<Vec<_>>()
        .join(terminator)
}
