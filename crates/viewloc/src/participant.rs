#![forbid(unsafe_code)]

//! Objects that display localized text and refresh it on demand.

use std::cell::Cell;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::Result;

static NEXT_PARTICIPANT_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a [`Localizable`] participant.
///
/// Registration is keyed by this value, never by content equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(u64);

impl ParticipantId {
    /// Placeholder identity; the coordinator refuses to register it.
    pub const NIL: Self = Self(0);

    /// Allocate a process-unique identifier.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_PARTICIPANT_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn is_nil(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability implemented by everything that shows localized text.
///
/// `localize` re-fetches the participant's texts for the now-active culture.
/// The suspended flag is independent of registration: a suspended
/// participant stays registered but is skipped by culture-change fan-outs.
/// Toggling the flag never calls `localize` by itself.
pub trait Localizable {
    fn participant_id(&self) -> ParticipantId;

    fn localize(&self) -> Result<()>;

    fn is_localization_suspended(&self) -> bool;

    fn set_localization_suspended(&self, suspended: bool);

    fn suspend_localization(&self) {
        self.set_localization_suspended(true);
    }

    fn resume_localization(&self) {
        self.set_localization_suspended(false);
    }
}

/// Identity and suspended flag, ready to embed in a participant.
///
/// ```
/// use viewloc::participant::{Localizable, LocalizationState, ParticipantId};
///
/// struct Banner {
///     state: LocalizationState,
/// }
///
/// impl Localizable for Banner {
///     fn participant_id(&self) -> ParticipantId {
///         self.state.id()
///     }
///     fn localize(&self) -> viewloc::Result<()> {
///         Ok(())
///     }
///     fn is_localization_suspended(&self) -> bool {
///         self.state.is_suspended()
///     }
///     fn set_localization_suspended(&self, suspended: bool) {
///         self.state.set_suspended(suspended);
///     }
/// }
///
/// let banner = Banner { state: LocalizationState::new() };
/// banner.suspend_localization();
/// assert!(banner.is_localization_suspended());
/// ```
#[derive(Debug)]
pub struct LocalizationState {
    id: ParticipantId,
    suspended: Cell<bool>,
}

impl LocalizationState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(ParticipantId::next())
    }

    #[must_use]
    pub fn with_id(id: ParticipantId) -> Self {
        Self {
            id,
            suspended: Cell::new(false),
        }
    }

    #[must_use]
    pub fn id(&self) -> ParticipantId {
        self.id
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended.get()
    }

    pub fn set_suspended(&self, suspended: bool) {
        self.suspended.set(suspended);
    }
}

impl Default for LocalizationState {
    fn default() -> Self {
        Self::new()
    }
}
