//! The type taxonomy resolver.
//!
//! Authoring tools emit loosely structured activity type strings
//! ("MenuActivity", "ExtQueueLookup", "transfer_to_agent", ...). This module
//! classifies them into a closed [`NodeCategory`] taxonomy via an ordered
//! rule table: case-insensitive substring predicates, evaluated top to
//! bottom, first match wins. Resolution is total; unrecognized types fall
//! back to [`NodeCategory::Generic`].

use crate::exits::ExitId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed taxonomy of node behaviors.
///
/// `EventHeader` is synthetic: it is only produced by the graph builder for
/// event sub-flow headers, never by [`resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeCategory {
    Start,
    Menu,
    Collect,
    Condition,
    Case,
    BusinessHours,
    Queue,
    QueueLookup,
    Transfer,
    Prompt,
    SetVariable,
    Integration,
    Voicemail,
    Disconnect,
    EventHeader,
    Generic,
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeCategory::Start => "start",
            NodeCategory::Menu => "menu",
            NodeCategory::Collect => "collect",
            NodeCategory::Condition => "condition",
            NodeCategory::Case => "case",
            NodeCategory::BusinessHours => "businessHours",
            NodeCategory::Queue => "queue",
            NodeCategory::QueueLookup => "queueLookup",
            NodeCategory::Transfer => "transfer",
            NodeCategory::Prompt => "prompt",
            NodeCategory::SetVariable => "setVariable",
            NodeCategory::Integration => "integration",
            NodeCategory::Voicemail => "voicemail",
            NodeCategory::Disconnect => "disconnect",
            NodeCategory::EventHeader => "eventHeader",
            NodeCategory::Generic => "generic",
        };
        f.write_str(name)
    }
}

/// The resolved classification of a raw activity type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeInfo {
    pub category: NodeCategory,
    /// Display label used when the activity carries no name of its own.
    pub label: &'static str,
    /// Named exits beyond the implicit default/success exit, in the order
    /// the rendering layer draws their anchors.
    pub extra_exits: &'static [ExitId],
}

struct TypeRule {
    /// Every needle must be present for the rule to match, so a compound
    /// rule like `["queue", "lookup"]` outranks a bare `["queue"]` placed
    /// after it.
    needles: &'static [&'static str],
    category: NodeCategory,
    label: &'static str,
    extra_exits: &'static [ExitId],
}

const NO_EXITS: &[ExitId] = &[];
const ERROR_ONLY: &[ExitId] = &[ExitId::Error];
const MENU_EXITS: &[ExitId] = &[ExitId::Timeout, ExitId::Invalid, ExitId::Error];
const TRANSFER_EXITS: &[ExitId] = &[
    ExitId::Busy,
    ExitId::NoAnswer,
    ExitId::Invalid,
    ExitId::Error,
];
const CONDITION_EXITS: &[ExitId] = &[ExitId::False, ExitId::Error];
const SCHEDULE_EXITS: &[ExitId] = &[
    ExitId::WorkingHours,
    ExitId::Holiday,
    ExitId::Override,
    ExitId::Error,
];
const LOOKUP_EXITS: &[ExitId] = &[ExitId::Timeout, ExitId::Error];

/// Ordered classification rules. Compound rules precede the generic rules
/// they would otherwise be shadowed by.
const TYPE_RULES: &[TypeRule] = &[
    TypeRule {
        needles: &["queue", "lookup"],
        category: NodeCategory::QueueLookup,
        label: "Queue Lookup",
        extra_exits: LOOKUP_EXITS,
    },
    TypeRule {
        needles: &["business", "hours"],
        category: NodeCategory::BusinessHours,
        label: "Business Hours",
        extra_exits: SCHEDULE_EXITS,
    },
    TypeRule {
        needles: &["schedule"],
        category: NodeCategory::BusinessHours,
        label: "Business Hours",
        extra_exits: SCHEDULE_EXITS,
    },
    TypeRule {
        needles: &["start"],
        category: NodeCategory::Start,
        label: "Start",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["incoming"],
        category: NodeCategory::Start,
        label: "Incoming Call",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["menu"],
        category: NodeCategory::Menu,
        label: "Menu",
        extra_exits: MENU_EXITS,
    },
    TypeRule {
        needles: &["collect"],
        category: NodeCategory::Collect,
        label: "Collect Digits",
        extra_exits: MENU_EXITS,
    },
    TypeRule {
        needles: &["digits"],
        category: NodeCategory::Collect,
        label: "Collect Digits",
        extra_exits: MENU_EXITS,
    },
    TypeRule {
        needles: &["condition"],
        category: NodeCategory::Condition,
        label: "Condition",
        extra_exits: CONDITION_EXITS,
    },
    TypeRule {
        needles: &["decision"],
        category: NodeCategory::Condition,
        label: "Condition",
        extra_exits: CONDITION_EXITS,
    },
    TypeRule {
        needles: &["case"],
        category: NodeCategory::Case,
        label: "Case",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["switch"],
        category: NodeCategory::Case,
        label: "Case",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["transfer"],
        category: NodeCategory::Transfer,
        label: "Transfer",
        extra_exits: TRANSFER_EXITS,
    },
    TypeRule {
        needles: &["dial"],
        category: NodeCategory::Transfer,
        label: "Transfer",
        extra_exits: TRANSFER_EXITS,
    },
    TypeRule {
        needles: &["bridge"],
        category: NodeCategory::Transfer,
        label: "Transfer",
        extra_exits: TRANSFER_EXITS,
    },
    TypeRule {
        needles: &["queue"],
        category: NodeCategory::Queue,
        label: "Queue",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["voicemail"],
        category: NodeCategory::Voicemail,
        label: "Voicemail",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["prompt"],
        category: NodeCategory::Prompt,
        label: "Play Prompt",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["play"],
        category: NodeCategory::Prompt,
        label: "Play Prompt",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["announce"],
        category: NodeCategory::Prompt,
        label: "Play Prompt",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["tts"],
        category: NodeCategory::Prompt,
        label: "Play Prompt",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["variable"],
        category: NodeCategory::SetVariable,
        label: "Set Variable",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["assign"],
        category: NodeCategory::SetVariable,
        label: "Set Variable",
        extra_exits: ERROR_ONLY,
    },
    TypeRule {
        needles: &["http"],
        category: NodeCategory::Integration,
        label: "Integration",
        extra_exits: LOOKUP_EXITS,
    },
    TypeRule {
        needles: &["webservice"],
        category: NodeCategory::Integration,
        label: "Integration",
        extra_exits: LOOKUP_EXITS,
    },
    TypeRule {
        needles: &["integration"],
        category: NodeCategory::Integration,
        label: "Integration",
        extra_exits: LOOKUP_EXITS,
    },
    TypeRule {
        needles: &["lookup"],
        category: NodeCategory::Integration,
        label: "Integration",
        extra_exits: LOOKUP_EXITS,
    },
    TypeRule {
        needles: &["disconnect"],
        category: NodeCategory::Disconnect,
        label: "Disconnect",
        extra_exits: NO_EXITS,
    },
    TypeRule {
        needles: &["hangup"],
        category: NodeCategory::Disconnect,
        label: "Disconnect",
        extra_exits: NO_EXITS,
    },
    TypeRule {
        needles: &["terminat"],
        category: NodeCategory::Disconnect,
        label: "Disconnect",
        extra_exits: NO_EXITS,
    },
];

const GENERIC_INFO: TypeInfo = TypeInfo {
    category: NodeCategory::Generic,
    label: "Activity",
    extra_exits: ERROR_ONLY,
};

/// Classifies a raw activity type string. Total and deterministic.
pub fn resolve(raw_type: &str) -> TypeInfo {
    let haystack = raw_type.to_ascii_lowercase();
    for rule in TYPE_RULES {
        if rule.needles.iter().all(|needle| haystack.contains(needle)) {
            return TypeInfo {
                category: rule.category,
                label: rule.label,
                extra_exits: rule.extra_exits,
            };
        }
    }
    tracing::debug!(raw_type, "unrecognized activity type, using generic category");
    GENERIC_INFO
}

/// Looks up the `TypeInfo` for an already-resolved category, used by
/// consumers that carry a category but not the raw type (event headers,
/// artifact restoration). Falls back to the generic info.
pub fn info_for(category: NodeCategory) -> TypeInfo {
    for rule in TYPE_RULES {
        if rule.category == category {
            return TypeInfo {
                category: rule.category,
                label: rule.label,
                extra_exits: rule.extra_exits,
            };
        }
    }
    TypeInfo {
        category,
        ..GENERIC_INFO
    }
}
