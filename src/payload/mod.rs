//! Output rendering: raw text, JSON envelopes, or a quoted shell word.

pub mod types;

use std::borrow::Cow;

use clap::ValueEnum;
use serde::Serialize;

use types::{BaseRef, ContentEnvelope, PullRequest, PullRequestEvent};

pub const DEFAULT_BASE_REF: &str = "master";

#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("failed to serialize payload: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    /// The sanitized text as is
    #[default]
    Raw,
    /// `{"content": "..."}`
    Json,
    /// `{"pull_request": {"body": ..., "base": {"ref": ...}, "merged": ...}}`
    PullRequest,
    /// A single POSIX shell word (single-quoted when needed)
    Shell,
}

/// Fields of the pull-request event that do not come from the markdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestOptions {
    pub base: String,
    pub merged: bool,
}

impl Default for PullRequestOptions {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE_REF.to_string(),
            merged: true,
        }
    }
}

/// Render `text` in the requested format. JSON keeps non-ASCII characters literal.
pub fn render(
    text: &str,
    format: Format,
    pr: &PullRequestOptions,
    pretty: bool,
) -> Result<String, PayloadError> {
    match format {
        Format::Raw => Ok(text.to_string()),
        Format::Json => to_json(
            &ContentEnvelope {
                content: text.to_string(),
            },
            pretty,
        ),
        Format::PullRequest => to_json(
            &PullRequestEvent {
                pull_request: PullRequest {
                    body: text.to_string(),
                    base: BaseRef {
                        ref_: pr.base.clone(),
                    },
                    merged: pr.merged,
                },
            },
            pretty,
        ),
        Format::Shell => Ok(shell_escape::unix::escape(Cow::Borrowed(text)).into_owned()),
    }
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String, PayloadError> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
