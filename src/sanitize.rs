//! Text sanitizer: escapes markdown for embedding in JSON and shell string literals.
//!
//! Steps always run in the same order:
//! backticks → parentheses → control characters → HTML comments → leading trim → trailing trim.
//! Escaping happens first so that later steps never see (or re-escape) characters
//! introduced by earlier ones. Once control characters are escaped the text holds a
//! single line, so trimming only touches its two ends.

use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use tracing::debug;

use crate::markdown::{escape_backticks, escape_controls, escape_parens};

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static LINE_START_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)^[^\S\r\n]+").expect("valid regex"));
static LINE_END_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?mR)[^\S\r\n]+$").expect("valid regex"));

/// A single transformation in the pipeline.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// `` ` `` → `` \` ``
    Backticks,
    /// `(` → `\(` and `)` → `\)`
    Parens,
    /// newline → `\n`, tab → `\t`, carriage return removed
    Controls,
    /// delete `<!-- ... -->` blocks
    Comments,
    /// strip whitespace at the start of every line
    LineStarts,
    /// strip whitespace at the end of every line
    LineEnds,
}

impl Step {
    pub const ALL: [Step; 6] = [
        Step::Backticks,
        Step::Parens,
        Step::Controls,
        Step::Comments,
        Step::LineStarts,
        Step::LineEnds,
    ];
}

/// Named starting configurations.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Preset {
    /// Every step.
    #[default]
    Full,
    /// Backticks, parentheses and comment removal; line structure is kept.
    Markup,
    /// No transformation at all.
    None,
}

/// Which steps of the pipeline run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SanitizeOptions {
    pub escape_backticks: bool,
    pub escape_parens: bool,
    pub escape_controls: bool,
    pub strip_comments: bool,
    pub trim_line_starts: bool,
    pub trim_line_ends: bool,
}

impl Default for SanitizeOptions {
    fn default() -> Self {
        Self::from_preset(Preset::default())
    }
}

impl SanitizeOptions {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Full => Self {
                escape_backticks: true,
                escape_parens: true,
                escape_controls: true,
                strip_comments: true,
                trim_line_starts: true,
                trim_line_ends: true,
            },
            Preset::Markup => Self {
                escape_backticks: true,
                escape_parens: true,
                strip_comments: true,
                ..Self::from_preset(Preset::None)
            },
            Preset::None => Self {
                escape_backticks: false,
                escape_parens: false,
                escape_controls: false,
                strip_comments: false,
                trim_line_starts: false,
                trim_line_ends: false,
            },
        }
    }

    /// Disable one step, keeping the rest as they are.
    pub fn skip(mut self, step: Step) -> Self {
        *self.flag_mut(step) = false;
        self
    }

    pub fn is_enabled(&self, step: Step) -> bool {
        match step {
            Step::Backticks => self.escape_backticks,
            Step::Parens => self.escape_parens,
            Step::Controls => self.escape_controls,
            Step::Comments => self.strip_comments,
            Step::LineStarts => self.trim_line_starts,
            Step::LineEnds => self.trim_line_ends,
        }
    }

    /// Enabled steps in pipeline order.
    pub fn enabled_steps(&self) -> Vec<Step> {
        Step::ALL
            .into_iter()
            .filter(|s| self.is_enabled(*s))
            .collect()
    }

    fn flag_mut(&mut self, step: Step) -> &mut bool {
        match step {
            Step::Backticks => &mut self.escape_backticks,
            Step::Parens => &mut self.escape_parens,
            Step::Controls => &mut self.escape_controls,
            Step::Comments => &mut self.strip_comments,
            Step::LineStarts => &mut self.trim_line_starts,
            Step::LineEnds => &mut self.trim_line_ends,
        }
    }
}

/// Run every enabled step over `text`.
pub fn sanitize(text: &str, opts: &SanitizeOptions) -> String {
    let steps = opts.enabled_steps();
    let mut out = text.to_string();
    for step in &steps {
        out = apply(*step, &out);
    }
    debug!(
        ?steps,
        bytes_in = text.len(),
        bytes_out = out.len(),
        "text sanitized"
    );
    out
}

fn apply(step: Step, s: &str) -> String {
    match step {
        Step::Backticks => escape_backticks(s),
        Step::Parens => escape_parens(s),
        Step::Controls => escape_controls(s),
        Step::Comments => strip_comments(s),
        Step::LineStarts => trim_line_starts(s),
        Step::LineEnds => trim_line_ends(s),
    }
}

/// Delete every `<!-- ... -->` block, including ones spanning several lines.
///
/// Repeats until nothing matches, so removing an inner comment cannot leave a new
/// one behind (`<!<!-- a -->-- b -->`). An unterminated `<!--` is kept.
/// Each pass rescans the whole text, so input nested `n` levels deep this way
/// costs `n` passes (quadratic in the worst case).
pub fn strip_comments(s: &str) -> String {
    let mut out = COMMENT_RE.replace_all(s, "").into_owned();
    while COMMENT_RE.is_match(&out) {
        out = COMMENT_RE.replace_all(&out, "").into_owned();
    }
    out
}

/// Strip horizontal whitespace at the start of each line. Line breaks are kept.
pub fn trim_line_starts(s: &str) -> String {
    LINE_START_WS_RE.replace_all(s, "").into_owned()
}

/// Strip horizontal whitespace at the end of each line. Line breaks are kept.
pub fn trim_line_ends(s: &str) -> String {
    LINE_END_WS_RE.replace_all(s, "").into_owned()
}
