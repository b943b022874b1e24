use serde::{Deserialize, Serialize};

/// `{"content": "..."}` envelope consumed by the comment/description update step.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ContentEnvelope {
    pub content: String,
}

/// Pull-request event document for the branch-delete workflow, mirroring the
/// subset of GitHub's `pull_request` webhook payload that the workflow reads.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PullRequestEvent {
    pub pull_request: PullRequest,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PullRequest {
    pub body: String,
    pub base: BaseRef,
    pub merged: bool,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct BaseRef {
    #[serde(rename = "ref")]
    pub ref_: String,
}
