#![forbid(unsafe_code)]

//! Application localization coordinator.
//!
//! # Design
//!
//! [`LocalizationCoordinator`] owns the current culture and a registry of
//! [`Localizable`] participants. Setting a culture whose name differs from
//! the active one stores it, pushes it into the [`AmbientLocale`], raises
//! [`CultureChanged`] to every listener, then asks each non-suspended
//! participant to re-localize, in registration order.
//!
//! Culture state moves `Unset → Default → Active`: the first read of
//! [`current_culture`](LocalizationCoordinator::current_culture) lazily
//! establishes the default culture and pushes it into the ambient locale
//! without any notification, and every explicit assignment makes the state
//! `Active`. Either way, lookups run in the coordinator's culture.
//!
//! Participants and listeners are held weakly; their lifetime belongs to
//! whoever created them. Dead entries are pruned lazily.
//!
//! # Failure Modes
//!
//! - **Participant failure**: the fan-out continues with the remaining
//!   participants; failures are collected in [`FanOutReport::failures`] and
//!   logged at `warn`.
//! - **Re-entrant registration**: the fan-out iterates a snapshot taken
//!   before the first callback, so registering or deregistering from inside
//!   `localize()` only affects later passes.
//!
//! Everything here is single-threaded (`Rc`/`RefCell`), matching the UI
//! thread that owns view models.

use std::any::Any;
use std::cell::{OnceCell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::field::Empty;
use tracing::{Span, debug, info_span, warn};
use web_time::Instant;

use crate::ambient::{AmbientLocale, ProcessLocale};
use crate::catalog::TextStore;
use crate::config::{DEFAULT_CULTURE, LocalizationConfig};
use crate::culture::Culture;
use crate::error::{L10nError, Result};
use crate::key::KeyDeriver;
use crate::participant::{Localizable, ParticipantId};
use crate::texts::LocalizedTexts;

type ListenerRc = Rc<dyn Fn(&CultureChanged)>;
type ListenerWeak = Weak<dyn Fn(&CultureChanged)>;

/// Payload raised after the current culture changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CultureChanged {
    pub culture: Culture,
}

/// Where the coordinator's culture currently comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CultureState {
    /// Nothing has read or assigned a culture yet.
    Unset,
    /// Established lazily from the default provider.
    Default(Culture),
    /// Explicitly assigned.
    Active(Culture),
}

impl CultureState {
    #[must_use]
    pub fn culture(&self) -> Option<&Culture> {
        match self {
            Self::Unset => None,
            Self::Default(culture) | Self::Active(culture) => Some(culture),
        }
    }
}

/// Outcome of one notification pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FanOutReport {
    pub culture: Culture,
    /// `false` when the assignment was a no-op (same culture name).
    pub changed: bool,
    /// Participants whose `localize()` ran (successfully or not).
    pub notified: usize,
    /// Participants skipped because localization was suspended.
    pub suspended: usize,
    pub failures: Vec<(ParticipantId, L10nError)>,
}

impl FanOutReport {
    fn unchanged(culture: Culture) -> Self {
        Self {
            culture,
            changed: false,
            notified: 0,
            suspended: 0,
            failures: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// `Err(FanOutFailed)` if any participant failed.
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(L10nError::FanOutFailed {
                failures: self.failures,
            })
        }
    }
}

struct Registration {
    id: ParticipantId,
    participant: Weak<dyn Localizable>,
}

/// Owns the current culture and drives re-localization.
pub struct LocalizationCoordinator {
    texts: Rc<LocalizedTexts>,
    ambient: Rc<dyn AmbientLocale>,
    default_provider: Box<dyn Fn() -> Culture>,
    default_culture: OnceCell<Culture>,
    state: RefCell<CultureState>,
    participants: RefCell<Vec<Registration>>,
    listeners: RefCell<Vec<ListenerWeak>>,
}

impl fmt::Debug for LocalizationCoordinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalizationCoordinator")
            .field("state", &self.state.borrow())
            .field("registered", &self.count_registered())
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

impl LocalizationCoordinator {
    /// Coordinator over `store` using the process-wide ambient locale, the
    /// built-in naming convention, and `de-DE` as default culture.
    pub fn new(store: impl TextStore + 'static) -> Self {
        Self::with_ambient(store, KeyDeriver::default(), Rc::new(ProcessLocale))
    }

    /// Coordinator with an explicit naming convention and ambient locale.
    ///
    /// The same ambient handle backs the coordinator's
    /// [`LocalizedTexts`], so lookups follow culture changes.
    pub fn with_ambient(
        store: impl TextStore + 'static,
        deriver: KeyDeriver,
        ambient: Rc<dyn AmbientLocale>,
    ) -> Self {
        let texts = LocalizedTexts::with_parts(store, deriver, Rc::clone(&ambient));
        Self {
            texts: Rc::new(texts),
            ambient,
            default_provider: Box::new(|| {
                Culture::new(DEFAULT_CULTURE).unwrap_or_else(|_| Culture::invariant())
            }),
            default_culture: OnceCell::new(),
            state: RefCell::new(CultureState::Unset),
            participants: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
        }
    }

    /// Coordinator configured from `config`: naming convention and default
    /// culture. Fails with [`L10nError::InvalidArgument`] for invalid values.
    pub fn from_config(
        config: &LocalizationConfig,
        store: impl TextStore + 'static,
        ambient: Rc<dyn AmbientLocale>,
    ) -> Result<Self> {
        let default_culture = config.default_culture()?;
        let deriver = config.key_deriver()?;
        Ok(Self::with_ambient(store, deriver, ambient).with_default_culture(default_culture))
    }

    /// Validate `config`, load its resource directory, and build a
    /// coordinator on the process-wide ambient locale.
    #[cfg(feature = "resource-files")]
    pub fn load(
        config: &LocalizationConfig,
    ) -> std::result::Result<Self, crate::error::ConfigError> {
        let config = config.clone().validated()?;
        let catalog = crate::catalog::TextCatalog::load_dir(&config.resources)?;
        Ok(Self::from_config(&config, catalog, Rc::new(ProcessLocale))?)
    }

    #[must_use]
    pub fn with_default_culture(self, culture: Culture) -> Self {
        self.with_default_culture_provider(move || culture.clone())
    }

    /// Provider consulted at most once, on the first culture read.
    #[must_use]
    pub fn with_default_culture_provider(
        mut self,
        provider: impl Fn() -> Culture + 'static,
    ) -> Self {
        self.default_provider = Box::new(provider);
        self
    }

    /// Lookup service bound to this coordinator's ambient locale.
    #[must_use]
    pub fn texts(&self) -> Rc<LocalizedTexts> {
        Rc::clone(&self.texts)
    }

    #[must_use]
    pub fn default_culture(&self) -> Culture {
        self.default_culture
            .get_or_init(|| (self.default_provider)())
            .clone()
    }

    /// The active culture, establishing the default on first access.
    ///
    /// Establishing the default applies it to the ambient locale but raises
    /// no event and runs no notification pass.
    #[must_use]
    pub fn current_culture(&self) -> Culture {
        if let Some(culture) = self.state.borrow().culture() {
            return culture.clone();
        }
        let culture = self.default_culture();
        *self.state.borrow_mut() = CultureState::Default(culture.clone());
        self.ambient.apply(&culture);
        debug!(culture = %culture, "established default culture");
        culture
    }

    #[must_use]
    pub fn culture_state(&self) -> CultureState {
        self.state.borrow().clone()
    }

    /// Parse `name` and assign it. Blank names are rejected.
    pub fn set_current_culture_name(&self, name: &str) -> Result<FanOutReport> {
        let culture = Culture::new(name)?;
        Ok(self.set_current_culture(culture))
    }

    /// Replace the current culture and notify, unless the name is unchanged.
    pub fn set_current_culture(&self, culture: Culture) -> FanOutReport {
        let unchanged = self
            .state
            .borrow()
            .culture()
            .is_some_and(|current| current.name() == culture.name());
        if unchanged {
            debug!(culture = %culture, "culture unchanged; skipping notification");
            return FanOutReport::unchanged(culture);
        }

        *self.state.borrow_mut() = CultureState::Active(culture.clone());
        self.ambient.apply(&culture);

        let span = info_span!(
            "l10n.culture_change",
            culture = %culture,
            notified = Empty,
            suspended = Empty,
            failed = Empty,
            duration_us = Empty,
        );
        let _guard = span.enter();
        self.raise_culture_changed(&culture);
        let mut report = self.fan_out(culture, &span);
        report.changed = true;
        report
    }

    /// Run a notification pass for the current culture without changing it.
    pub fn localize_all(&self) -> FanOutReport {
        let culture = self.current_culture();
        let span = info_span!(
            "l10n.localize_all",
            culture = %culture,
            notified = Empty,
            suspended = Empty,
            failed = Empty,
            duration_us = Empty,
        );
        let _guard = span.enter();
        self.fan_out(culture, &span)
    }

    /// Listen for culture changes. Dropping the guard unsubscribes.
    pub fn on_culture_changed(&self, callback: impl Fn(&CultureChanged) + 'static) -> Subscription {
        let strong: ListenerRc = Rc::new(callback);
        self.listeners.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Register `participant` for re-localization.
    ///
    /// Registering an already registered identifier is a no-op. The
    /// coordinator keeps only a weak handle.
    pub fn register<P: Localizable + 'static>(&self, participant: &Rc<P>) -> Result<()> {
        let weak: Weak<P> = Rc::downgrade(participant);
        self.insert(participant.participant_id(), weak)
    }

    /// [`register`](Self::register) for an already type-erased participant.
    pub fn register_dyn(&self, participant: &Rc<dyn Localizable>) -> Result<()> {
        self.insert(participant.participant_id(), Rc::downgrade(participant))
    }

    /// Remove the participant with `participant`'s identifier, if registered.
    pub fn deregister<P: Localizable + ?Sized>(&self, participant: &P) -> Result<()> {
        self.deregister_id(participant.participant_id())
    }

    pub fn deregister_id(&self, id: ParticipantId) -> Result<()> {
        if id.is_nil() {
            return Err(L10nError::invalid("participant has no identity"));
        }
        let mut participants = self.participants.borrow_mut();
        prune(&mut participants);
        match participants.iter().position(|r| r.id == id) {
            Some(idx) => {
                participants.remove(idx);
                debug!(participant = %id, "deregistered from localization");
            }
            None => debug!(participant = %id, "not registered; nothing to deregister"),
        }
        Ok(())
    }

    #[must_use]
    pub fn is_registered(&self, id: ParticipantId) -> bool {
        self.participants
            .borrow()
            .iter()
            .any(|r| r.id == id && r.participant.strong_count() > 0)
    }

    /// Number of live registered participants.
    #[must_use]
    pub fn count_registered(&self) -> usize {
        self.participants
            .borrow()
            .iter()
            .filter(|r| r.participant.strong_count() > 0)
            .count()
    }

    fn insert(&self, id: ParticipantId, participant: Weak<dyn Localizable>) -> Result<()> {
        if id.is_nil() {
            return Err(L10nError::invalid("participant has no identity"));
        }
        let mut participants = self.participants.borrow_mut();
        prune(&mut participants);
        if participants.iter().any(|r| r.id == id) {
            debug!(participant = %id, "already registered for localization");
            return Ok(());
        }
        participants.push(Registration { id, participant });
        debug!(participant = %id, registered = participants.len(), "registered for localization");
        Ok(())
    }

    fn raise_culture_changed(&self, culture: &Culture) {
        let listeners: Vec<ListenerRc> = {
            let mut listeners = self.listeners.borrow_mut();
            listeners.retain(|w| w.strong_count() > 0);
            listeners.iter().filter_map(Weak::upgrade).collect()
        };
        if listeners.is_empty() {
            return;
        }
        let event = CultureChanged {
            culture: culture.clone(),
        };
        for listener in &listeners {
            listener(&event);
        }
    }

    /// Notify the snapshot of live participants and record the totals on
    /// `span`.
    fn fan_out(&self, culture: Culture, span: &Span) -> FanOutReport {
        let snapshot: Vec<(ParticipantId, Rc<dyn Localizable>)> = {
            let mut participants = self.participants.borrow_mut();
            prune(&mut participants);
            participants
                .iter()
                .filter_map(|r| r.participant.upgrade().map(|p| (r.id, p)))
                .collect()
        };

        let started = Instant::now();
        let mut report = FanOutReport::unchanged(culture);
        for (id, participant) in snapshot {
            if participant.is_localization_suspended() {
                report.suspended += 1;
                continue;
            }
            report.notified += 1;
            if let Err(error) = participant.localize() {
                warn!(participant = %id, error = %error, "participant failed to localize");
                report.failures.push((id, error));
            }
        }

        let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        span.record("notified", report.notified);
        span.record("suspended", report.suspended);
        span.record("failed", report.failures.len());
        span.record("duration_us", duration_us);
        report
    }
}

fn prune(participants: &mut Vec<Registration>) {
    participants.retain(|r| r.participant.strong_count() > 0);
}

/// RAII guard for a culture-changed listener.
///
/// Dropping it releases the only strong reference to the callback, so the
/// coordinator's weak entry stops upgrading and is pruned on the next event.
pub struct Subscription {
    _guard: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ambient::LocaleCell;
    use crate::catalog::TextCatalog;
    use crate::participant::LocalizationState;
    use std::cell::Cell;

    fn culture(name: &str) -> Culture {
        Culture::new(name).unwrap()
    }

    fn coordinator() -> (LocalizationCoordinator, LocaleCell) {
        let ambient = LocaleCell::default();
        let coordinator = LocalizationCoordinator::with_ambient(
            TextCatalog::new(),
            KeyDeriver::default(),
            Rc::new(ambient.clone()),
        );
        (coordinator, ambient)
    }

    struct Counter {
        state: LocalizationState,
        calls: Cell<u32>,
        fail: bool,
    }

    impl Counter {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                state: LocalizationState::new(),
                calls: Cell::new(0),
                fail: false,
            })
        }

        fn failing() -> Rc<Self> {
            Rc::new(Self {
                state: LocalizationState::new(),
                calls: Cell::new(0),
                fail: true,
            })
        }
    }

    impl Localizable for Counter {
        fn participant_id(&self) -> ParticipantId {
            self.state.id()
        }

        fn localize(&self) -> Result<()> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(L10nError::localize(self.state.id(), "boom"))
            } else {
                Ok(())
            }
        }

        fn is_localization_suspended(&self) -> bool {
            self.state.is_suspended()
        }

        fn set_localization_suspended(&self, suspended: bool) {
            self.state.set_suspended(suspended);
        }
    }

    #[test]
    fn first_read_establishes_default_without_event() {
        let (coordinator, ambient) = coordinator();
        let events = Rc::new(Cell::new(0u32));
        let events_clone = Rc::clone(&events);
        let _sub = coordinator.on_culture_changed(move |_| events_clone.set(events_clone.get() + 1));

        assert_eq!(coordinator.culture_state(), CultureState::Unset);
        assert_eq!(coordinator.current_culture().name(), "de-DE");
        assert_eq!(
            coordinator.culture_state(),
            CultureState::Default(culture("de-DE"))
        );
        assert_eq!(events.get(), 0);
        assert_eq!(ambient.current().name(), "de-DE");
    }

    #[test]
    fn default_provider_runs_once() {
        let (coordinator, _) = coordinator();
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let coordinator = coordinator.with_default_culture_provider(move || {
            calls_clone.set(calls_clone.get() + 1);
            Culture::new("sv-SE").unwrap()
        });
        assert_eq!(coordinator.current_culture().name(), "sv-SE");
        assert_eq!(coordinator.default_culture().name(), "sv-SE");
        assert_eq!(coordinator.current_culture().name(), "sv-SE");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn setting_a_new_culture_notifies_everyone() {
        let (coordinator, ambient) = coordinator();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = coordinator.on_culture_changed(move |event| {
            seen_clone.borrow_mut().push(event.culture.name().to_string());
        });
        let a = Counter::new();
        let b = Counter::new();
        coordinator.register(&a).unwrap();
        coordinator.register(&b).unwrap();

        let report = coordinator.set_current_culture(culture("en-US"));
        assert!(report.changed);
        assert_eq!(report.notified, 2);
        assert!(report.is_clean());
        assert_eq!(a.calls.get(), 1);
        assert_eq!(b.calls.get(), 1);
        assert_eq!(*seen.borrow(), vec!["en-US"]);
        assert_eq!(ambient.current().name(), "en-US");
        assert_eq!(
            coordinator.culture_state(),
            CultureState::Active(culture("en-US"))
        );
    }

    #[test]
    fn equal_name_is_a_no_op() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();

        coordinator.set_current_culture(culture("fr-FR"));
        let report = coordinator.set_current_culture(culture("fr_FR"));
        assert!(!report.changed);
        assert_eq!(report.notified, 0);
        assert_eq!(a.calls.get(), 1);
    }

    #[test]
    fn assigning_the_established_default_is_a_no_op() {
        let (coordinator, ambient) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();

        let _ = coordinator.current_culture();
        let report = coordinator.set_current_culture(culture("de-DE"));
        assert!(!report.changed);
        assert_eq!(a.calls.get(), 0);
        assert_eq!(ambient.current().name(), "de-DE");
    }

    #[test]
    fn assigning_default_before_any_read_still_notifies() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();
        assert!(coordinator.set_current_culture(culture("de-DE")).changed);
        assert_eq!(a.calls.get(), 1);
    }

    #[test]
    fn suspended_participants_are_skipped_until_resumed() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();

        a.suspend_localization();
        let report = coordinator.set_current_culture(culture("en-US"));
        assert_eq!(report.suspended, 1);
        assert_eq!(report.notified, 0);
        assert_eq!(a.calls.get(), 0);

        a.resume_localization();
        assert_eq!(a.calls.get(), 0);
        coordinator.set_current_culture(culture("de-DE"));
        assert_eq!(a.calls.get(), 1);
    }

    #[test]
    fn registration_is_unique_by_id() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();
        coordinator.register(&a).unwrap();
        assert_eq!(coordinator.count_registered(), 1);

        let dyn_a: Rc<dyn Localizable> = a.clone();
        coordinator.register_dyn(&dyn_a).unwrap();
        assert_eq!(coordinator.count_registered(), 1);
    }

    #[test]
    fn deregistration() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        let b = Counter::new();
        coordinator.register(&a).unwrap();
        coordinator.register(&b).unwrap();

        coordinator.deregister(&*a).unwrap();
        assert_eq!(coordinator.count_registered(), 1);
        assert!(!coordinator.is_registered(a.participant_id()));

        coordinator.deregister(&*a).unwrap();
        assert_eq!(coordinator.count_registered(), 1);

        coordinator.set_current_culture(culture("en"));
        assert_eq!(a.calls.get(), 0);
        assert_eq!(b.calls.get(), 1);
    }

    #[test]
    fn nil_identity_is_rejected() {
        struct Anonymous;
        impl Localizable for Anonymous {
            fn participant_id(&self) -> ParticipantId {
                ParticipantId::NIL
            }
            fn localize(&self) -> Result<()> {
                Ok(())
            }
            fn is_localization_suspended(&self) -> bool {
                false
            }
            fn set_localization_suspended(&self, _suspended: bool) {}
        }

        let (coordinator, _) = coordinator();
        let anon = Rc::new(Anonymous);
        assert!(coordinator.register(&anon).unwrap_err().is_invalid_argument());
        assert!(coordinator.deregister(&*anon).unwrap_err().is_invalid_argument());
        assert_eq!(coordinator.count_registered(), 0);
    }

    #[test]
    fn dropped_participants_are_not_counted_or_notified() {
        let (coordinator, _) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();
        {
            let temp = Counter::new();
            coordinator.register(&temp).unwrap();
            assert_eq!(coordinator.count_registered(), 2);
        }
        assert_eq!(coordinator.count_registered(), 1);
        let report = coordinator.set_current_culture(culture("en"));
        assert_eq!(report.notified, 1);
    }

    #[test]
    fn failures_are_collected_and_fan_out_continues() {
        let (coordinator, _) = coordinator();
        let bad = Counter::failing();
        let good = Counter::new();
        coordinator.register(&bad).unwrap();
        coordinator.register(&good).unwrap();

        let report = coordinator.set_current_culture(culture("en"));
        assert_eq!(report.notified, 2);
        assert_eq!(good.calls.get(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, bad.participant_id());

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, L10nError::FanOutFailed { ref failures } if failures.len() == 1));
    }

    #[test]
    fn notification_follows_registration_order() {
        struct Recorder {
            state: LocalizationState,
            name: &'static str,
            log: Rc<RefCell<Vec<&'static str>>>,
        }
        impl Localizable for Recorder {
            fn participant_id(&self) -> ParticipantId {
                self.state.id()
            }
            fn localize(&self) -> Result<()> {
                self.log.borrow_mut().push(self.name);
                Ok(())
            }
            fn is_localization_suspended(&self) -> bool {
                self.state.is_suspended()
            }
            fn set_localization_suspended(&self, suspended: bool) {
                self.state.set_suspended(suspended);
            }
        }

        let (coordinator, _) = coordinator();
        let log = Rc::new(RefCell::new(Vec::new()));
        let participants: Vec<Rc<Recorder>> = ["first", "second", "third"]
            .into_iter()
            .map(|name| {
                Rc::new(Recorder {
                    state: LocalizationState::new(),
                    name,
                    log: Rc::clone(&log),
                })
            })
            .collect();
        for p in &participants {
            coordinator.register(p).unwrap();
        }
        coordinator.set_current_culture(culture("en"));
        assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn dropping_subscription_stops_events() {
        let (coordinator, _) = coordinator();
        let events = Rc::new(Cell::new(0u32));
        let events_clone = Rc::clone(&events);
        let sub = coordinator.on_culture_changed(move |_| events_clone.set(events_clone.get() + 1));

        coordinator.set_current_culture(culture("en"));
        drop(sub);
        coordinator.set_current_culture(culture("de"));
        assert_eq!(events.get(), 1);
    }

    #[test]
    fn localize_all_runs_without_changing_culture() {
        let (coordinator, ambient) = coordinator();
        let a = Counter::new();
        coordinator.register(&a).unwrap();

        let report = coordinator.localize_all();
        assert!(!report.changed);
        assert_eq!(report.notified, 1);
        assert_eq!(report.culture.name(), "de-DE");
        assert_eq!(ambient.current().name(), "de-DE");
    }

    #[test]
    fn default_state_lookups_use_the_default_culture() {
        let mut catalog = TextCatalog::new().with_parent_fallback(false);
        catalog.insert(&culture("de-DE"), "Order_Total_Header", "Summe");
        let coordinator = LocalizationCoordinator::with_ambient(
            catalog,
            KeyDeriver::default(),
            Rc::new(LocaleCell::default()),
        );

        let report = coordinator.localize_all();
        assert_eq!(
            coordinator.culture_state(),
            CultureState::Default(culture("de-DE"))
        );
        let texts = coordinator.texts();
        assert_eq!(texts.active_culture(), report.culture);
        assert_eq!(texts.resolve("Order_Total_Header").unwrap(), "Summe");
    }

    #[test]
    fn set_by_name_validates() {
        let (coordinator, _) = coordinator();
        assert!(
            coordinator
                .set_current_culture_name("  ")
                .unwrap_err()
                .is_invalid_argument()
        );
        assert_eq!(coordinator.culture_state(), CultureState::Unset);
        assert!(coordinator.set_current_culture_name("pl_PL").unwrap().changed);
        assert_eq!(coordinator.current_culture().name(), "pl-PL");
    }

    #[test]
    fn from_config_applies_default_and_convention() {
        let config = LocalizationConfig {
            default_culture: "nb-NO".into(),
            view_model_suffix: "Presenter".into(),
            binding_suffixes: vec!["Label".into()],
            ..LocalizationConfig::default()
        };
        let coordinator =
            LocalizationCoordinator::from_config(&config, TextCatalog::new(), Rc::new(LocaleCell::default()))
                .unwrap();
        assert_eq!(coordinator.current_culture().name(), "nb-NO");
        assert_eq!(coordinator.texts().deriver().view_model_suffix(), "Presenter");
    }

    #[test]
    fn from_config_rejects_invalid_default() {
        let config = LocalizationConfig {
            default_culture: "".into(),
            ..LocalizationConfig::default()
        };
        let err = LocalizationCoordinator::from_config(
            &config,
            TextCatalog::new(),
            Rc::new(LocaleCell::default()),
        )
        .unwrap_err();
        assert!(err.is_invalid_argument());
    }
}
