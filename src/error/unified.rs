//! Error classification.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Broad error category, used by the benchmark driver when reporting failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ErrorCategory {
    /// Missing credentials or unusable configuration. Raised before any network activity.
    Configuration,
    /// Non-success status, broken connection or malformed body from a collaborator.
    Transport,
    /// Assertion-class failure: the caller or the provider broke an interface contract.
    Contract,
    /// A tool body failed while running.
    ToolExecution,
}
