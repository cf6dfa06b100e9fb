//! Canonical exit identifiers and the link-condition resolver.
//!
//! Input links carry free-text condition strings ("On Timeout", "busy",
//! "1", "gold", ...). The rendering layer needs a closed vocabulary of
//! outgoing handles instead, so every condition is resolved here into an
//! [`ExitId`] plus error/timeout classification flags.

use crate::taxonomy::NodeCategory;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A canonical, named outgoing branch of a graph node.
///
/// All variants except [`ExitId::Branch`] form a closed vocabulary; `Branch`
/// carries the data-defined branch identifiers of menu and case nodes (a
/// DTMF digit, a case label) verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExitId {
    Default,
    Error,
    Timeout,
    Busy,
    NoAnswer,
    Invalid,
    InsufficientData,
    False,
    True,
    WorkingHours,
    Holiday,
    Override,
    Branch(String),
}

impl ExitId {
    pub fn as_str(&self) -> &str {
        match self {
            ExitId::Default => "default",
            ExitId::Error => "error",
            ExitId::Timeout => "timeout",
            ExitId::Busy => "busy",
            ExitId::NoAnswer => "no_answer",
            ExitId::Invalid => "invalid",
            ExitId::InsufficientData => "insufficient_data",
            ExitId::False => "false",
            ExitId::True => "true",
            ExitId::WorkingHours => "workingHours",
            ExitId::Holiday => "holiday",
            ExitId::Override => "override",
            ExitId::Branch(name) => name,
        }
    }

    /// Parses a canonical identifier back into an `ExitId`. Unrecognized
    /// identifiers are data-defined branch names.
    pub fn from_canonical(id: &str) -> ExitId {
        match id {
            "default" => ExitId::Default,
            "error" => ExitId::Error,
            "timeout" => ExitId::Timeout,
            "busy" => ExitId::Busy,
            "no_answer" => ExitId::NoAnswer,
            "invalid" => ExitId::Invalid,
            "insufficient_data" => ExitId::InsufficientData,
            "false" => ExitId::False,
            "true" => ExitId::True,
            "workingHours" => ExitId::WorkingHours,
            "holiday" => ExitId::Holiday,
            "override" => ExitId::Override,
            other => ExitId::Branch(other.to_string()),
        }
    }

    /// Whether this exit is on the happy path (success/default/true). The
    /// layout engine privileges these edges when extracting the backbone.
    pub fn is_happy_path(&self) -> bool {
        match self {
            ExitId::Default | ExitId::True => true,
            ExitId::Branch(name) => name.eq_ignore_ascii_case("success"),
            _ => false,
        }
    }
}

impl fmt::Display for ExitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Serialized as the canonical identifier string, never as an enum tag, so
// the output graph and the binary artifact share one vocabulary.
impl Serialize for ExitId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ExitId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        if id.is_empty() {
            return Err(D::Error::custom("exit identifier must not be empty"));
        }
        Ok(ExitId::from_canonical(&id))
    }
}

/// The outcome of resolving one link condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedHandle {
    pub exit: ExitId,
    pub is_error_path: bool,
    pub is_timeout: bool,
}

impl ResolvedHandle {
    fn plain(exit: ExitId) -> Self {
        ResolvedHandle {
            exit,
            is_error_path: false,
            is_timeout: false,
        }
    }

    fn error(exit: ExitId) -> Self {
        ResolvedHandle {
            exit,
            is_error_path: true,
            is_timeout: false,
        }
    }

    fn timeout() -> Self {
        ResolvedHandle {
            exit: ExitId::Timeout,
            is_error_path: false,
            is_timeout: true,
        }
    }
}

/// Error-family tokens that map to a specific canonical exit. Checked before
/// the generic error bucket so "no_answer" never collapses into "error".
const SPECIFIC_ERROR_TOKENS: &[(&str, ExitId)] = &[
    ("busy", ExitId::Busy),
    ("no_answer", ExitId::NoAnswer),
    ("no answer", ExitId::NoAnswer),
    ("noanswer", ExitId::NoAnswer),
    ("invalid", ExitId::Invalid),
    ("insufficient_data", ExitId::InsufficientData),
    ("insufficient data", ExitId::InsufficientData),
    ("false", ExitId::False),
];

const GENERIC_ERROR_TOKENS: &[&str] = &["error", "failure", "exception"];

/// Resolves a raw link condition into a canonical exit identifier.
///
/// Precedence (first match wins, case-insensitive substring tests):
///
/// 1. Error-family tokens, specific before generic.
/// 2. `timeout`.
/// 3. Category-specific mapping: menu/case branches are data-defined and
///    pass through verbatim, condition nodes normalize to true/false,
///    business-hours nodes map onto their schedule exits, and everything
///    else falls back to the default exit.
///
/// An absent condition resolves to the default exit for every category.
pub fn resolve_handle(raw: Option<&str>, category: NodeCategory) -> ResolvedHandle {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return ResolvedHandle::plain(ExitId::Default);
    };
    let lowered = raw.to_ascii_lowercase();

    for (token, exit) in SPECIFIC_ERROR_TOKENS {
        if lowered.contains(token) {
            return ResolvedHandle::error(exit.clone());
        }
    }
    if GENERIC_ERROR_TOKENS.iter().any(|t| lowered.contains(t)) {
        return ResolvedHandle::error(ExitId::Error);
    }

    if lowered.contains("timeout") {
        return ResolvedHandle::timeout();
    }

    match category {
        NodeCategory::Menu | NodeCategory::Case => {
            ResolvedHandle::plain(ExitId::Branch(raw.to_string()))
        }
        NodeCategory::Condition => {
            if lowered.contains("true") || lowered.contains("yes") {
                ResolvedHandle::plain(ExitId::True)
            } else {
                ResolvedHandle::plain(ExitId::Default)
            }
        }
        NodeCategory::BusinessHours => {
            if lowered.contains("working") || lowered.contains("open") {
                ResolvedHandle::plain(ExitId::WorkingHours)
            } else if lowered.contains("holiday") {
                ResolvedHandle::plain(ExitId::Holiday)
            } else if lowered.contains("force") || lowered.contains("override") {
                ResolvedHandle::plain(ExitId::Override)
            } else {
                ResolvedHandle::plain(ExitId::Default)
            }
        }
        _ => ResolvedHandle::plain(ExitId::Default),
    }
}
