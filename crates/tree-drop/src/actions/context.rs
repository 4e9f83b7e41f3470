//! Session state shared by every action of one drop.

use serde::{Deserialize, Serialize};

/// A remembered "…All" choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum StickyChoice {
    OverwriteAll,
    KeepBothAll,
    SkipAll,
}

/// Shared, mutable state for one drop gesture.
///
/// Created by the controller when the drop starts, lent to each action in turn, and dropped when
/// the drop ends. Only one sticky choice can ever be latched, and cancellation is never reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionContext {
    multiple_actions: bool,
    sticky: Option<StickyChoice>,
    cancelled: bool,
}

impl ActionContext {
    /// Creates the context for a batch of `action_count` actions.
    pub fn new(action_count: usize) -> Self {
        Self {
            multiple_actions: action_count > 1,
            sticky: None,
            cancelled: false,
        }
    }

    /// True if the batch has more than one action, which enables the "…All" options.
    pub fn multiple_actions(&self) -> bool {
        self.multiple_actions
    }

    pub fn overwrite_all(&self) -> bool {
        self.sticky == Some(StickyChoice::OverwriteAll)
    }

    pub fn keep_both_all(&self) -> bool {
        self.sticky == Some(StickyChoice::KeepBothAll)
    }

    pub fn skip_all(&self) -> bool {
        self.sticky == Some(StickyChoice::SkipAll)
    }

    pub fn sticky_choice(&self) -> Option<StickyChoice> {
        self.sticky
    }

    /// Latches a sticky choice for the rest of the batch.
    ///
    /// Returns false (and changes nothing) if a sticky choice was already latched.
    pub fn latch(&mut self, choice: StickyChoice) -> bool {
        if let Some(existing) = self.sticky {
            log::warn!("ActionContext: ignoring {:?}, {:?} already latched", choice, existing);
            return false;
        }
        self.sticky = Some(choice);
        true
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
    }
}
