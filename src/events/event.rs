//! Event kinds, timings and notifications.
//!
//! A [`Notification`] is what listeners receive: one is built each time a
//! frame crosses a phase boundary on the resolution stack.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter};

use crate::stack::FrameId;

/// Category of a combat action. Used as a dispatch key.
///
/// The set is closed; adding a category means adding a variant.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
)]
pub enum EventKind {
    SkillUse,
    Attack,
    Targeted,
    DealDamage,
    ReceiveDamage,
    HealTarget,
    ReceiveHeal,
    TurnTick,
    EnterCombat,
    ExitCombat,
    Test,
}

/// Which side of a frame's effect a notification is sent from.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumCount,
    EnumIter,
)]
pub enum Timing {
    /// Sent while the frame is preprocessed. Listeners may still block it.
    Before,
    /// Sent after the frame's effect has run.
    After,
}

/// An immutable record of a single broadcast.
///
/// Carries the originating frame's identity and payload so listeners can
/// react (or block) without access to the frame itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Phase of the frame lifecycle.
    pub timing: Timing,

    /// Category of the originating frame.
    pub kind: EventKind,

    /// Identifier of the originating frame.
    pub frame: FrameId,

    /// Human-readable label of the originating frame.
    pub label: String,

    /// Numeric payload of the originating frame (damage, heal amount, ...).
    pub value: i64,
}

impl Notification {
    /// Create a new notification.
    pub fn new(
        timing: Timing,
        kind: EventKind,
        frame: FrameId,
        label: impl Into<String>,
        value: i64,
    ) -> Self {
        Self {
            timing,
            kind,
            frame,
            label: label.into(),
            value,
        }
    }

    /// Is this a Before notification?
    #[must_use]
    pub fn is_before(&self) -> bool {
        self.timing == Timing::Before
    }

    /// Is this an After notification?
    #[must_use]
    pub fn is_after(&self) -> bool {
        self.timing == Timing::After
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} from {} \"{}\" ({})",
            self.timing, self.kind, self.frame, self.label, self.value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_event_kind_is_closed() {
        assert_eq!(EventKind::COUNT, 11);
        assert_eq!(EventKind::iter().count(), EventKind::COUNT);
        assert_eq!(EventKind::DealDamage.to_string(), "DealDamage");
    }

    #[test]
    fn test_timing() {
        assert_eq!(Timing::COUNT, 2);
        assert_eq!(Timing::Before.as_ref(), "Before");
    }

    #[test]
    fn test_notification() {
        let n = Notification::new(
            Timing::Before,
            EventKind::Attack,
            FrameId::new(3),
            "Basic Attack",
            4,
        );

        assert!(n.is_before());
        assert!(!n.is_after());
        assert_eq!(n.label, "Basic Attack");
        assert_eq!(format!("{}", n), "Before Attack from Frame(3) \"Basic Attack\" (4)");
    }

    #[test]
    fn test_notification_serialization() {
        let n = Notification::new(Timing::After, EventKind::Test, FrameId::new(0), "testEvent", 0);
        let json = serde_json::to_string(&n).unwrap();
        let deserialized: Notification = serde_json::from_str(&json).unwrap();
        assert_eq!(n, deserialized);
    }
}
