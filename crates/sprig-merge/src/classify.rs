//! Per-file merge decisions.
//!
//! Files are compared by blob id only. A file's state in each of the three
//! snapshots (split point, current, given) is either absent or a blob id,
//! and the combination decides the action:
//!
//! | split | current | given | result |
//! |---|---|---|---|
//! | any | absent | absent | keep |
//! | `s` | `s` | absent | remove |
//! | `s` | `c != s` | absent | conflict, given side empty |
//! | `s` | absent | `s` | keep |
//! | `s` | absent | `g != s` | conflict, current side empty |
//! | `s` | `s` | `g != s` | take given |
//! | `s` | `c != s` | `g != s`, `g != c` | conflict |
//! | absent | absent | `g` | take given |
//! | absent | `c` | `g != c` | conflict |
//!
//! Every other combination keeps the current version.

use sprig_types::ObjectId;

/// What to do with one file during a merge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MergeAction {
    /// Leave the current version as it is.
    Keep,
    /// Delete the file and stage its removal.
    Remove,
    /// Check out the given branch's blob and stage it.
    TakeGiven(ObjectId),
    /// Write conflict markers combining both sides. `None` means the file
    /// does not exist on that side.
    Conflict {
        current: Option<ObjectId>,
        given: Option<ObjectId>,
    },
}

impl MergeAction {
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}

/// Decide the merge action for a file from its blob in the split point,
/// the current tip, and the given tip.
pub fn classify(
    split: Option<ObjectId>,
    current: Option<ObjectId>,
    given: Option<ObjectId>,
) -> MergeAction {
    match (split, current, given) {
        (_, None, None) => MergeAction::Keep,

        (Some(s), Some(c), None) if c == s => MergeAction::Remove,
        (Some(_), Some(c), None) => MergeAction::Conflict {
            current: Some(c),
            given: None,
        },

        (Some(s), None, Some(g)) if g == s => MergeAction::Keep,
        (Some(_), None, Some(g)) => MergeAction::Conflict {
            current: None,
            given: Some(g),
        },

        (Some(s), Some(c), Some(g)) => {
            if c == s && g != s {
                MergeAction::TakeGiven(g)
            } else if c != s && g != s && c != g {
                MergeAction::Conflict {
                    current: Some(c),
                    given: Some(g),
                }
            } else {
                MergeAction::Keep
            }
        }

        (None, None, Some(g)) => MergeAction::TakeGiven(g),
        (None, Some(c), Some(g)) if c != g => MergeAction::Conflict {
            current: Some(c),
            given: Some(g),
        },
        (None, Some(_), _) => MergeAction::Keep,
    }
}
