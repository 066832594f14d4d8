//! Reporting for seeds that were repaired instead of rejected.
//!
//! Generators never fail on `advance()`, and seeding only fails on malformed
//! input. Some seeds are well-formed but would leave a generator stuck, for
//! example an all-zero xorshift register. Those are repaired in place and the
//! repair is reported as a [`ContractViolation`].
//!
//! Violations go to [`TracingObserver`] unless a scope installed by
//! [`with_observer`] is active on the current thread.
//!
//! # Example
//!
//! ```
//! use fortress_random::engines::RomuTrio;
//! use fortress_random::telemetry::{with_observer, CollectingObserver, ViolationKind};
//! use std::sync::Arc;
//!
//! let observer = Arc::new(CollectingObserver::new());
//! let _rng = with_observer(observer.clone(), || RomuTrio::new(0, 0, 0));
//!
//! assert!(observer.has_violation(ViolationKind::DegenerateSeed));
//! ```

use parking_lot::Mutex;
use std::cell::RefCell;
use std::sync::Arc;

/// How far a repaired seed strays from what the caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationSeverity {
    /// The seed was repaired and the generator runs normally.
    Warning,
    /// The seed could not be applied at all; the default state was kept.
    Error,
}

impl ViolationSeverity {
    /// Label used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ViolationSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What was wrong with the seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum ViolationKind {
    /// An all-zero state for Xoroshiro, Romu, Seiran or Shioi, replaced by
    /// the SplitMix64(0) expansion.
    DegenerateSeed,
    /// An all-zero LXM xorshift register, derived from the LCG state.
    ///
    /// Forcing the LXM addend odd is a normalisation like the PCG increment
    /// and is not reported.
    SeedAdjusted,
    /// An engine rejected its own SplitMix64 expansion. Indicates a bug here.
    InternalError,
}

impl ViolationKind {
    /// Label used in log fields.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::DegenerateSeed => "degenerate_seed",
            Self::SeedAdjusted => "seed_adjusted",
            Self::InternalError => "internal_error",
        }
    }
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reported seed repair.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ContractViolation {
    /// How far the result strays from the requested seed.
    pub severity: ViolationSeverity,
    /// What was wrong with the seed.
    pub kind: ViolationKind,
    /// Algorithm label of the engine being seeded.
    pub algorithm: &'static str,
    /// What was repaired.
    pub message: String,
    /// `file:line` of the report.
    pub location: &'static str,
}

impl ContractViolation {
    /// Creates a violation; [`report_violation!`] fills in `location`.
    #[must_use]
    pub fn new(
        severity: ViolationSeverity,
        kind: ViolationKind,
        algorithm: &'static str,
        message: impl Into<String>,
        location: &'static str,
    ) -> Self {
        Self {
            severity,
            kind,
            algorithm,
            message: message.into(),
            location,
        }
    }

    /// Serializes this violation to one line of JSON.
    ///
    /// Returns `None` if serialization fails.
    #[cfg(feature = "json")]
    #[must_use]
    pub fn to_json(&self) -> Option<String> {
        serde_json::to_string(self).ok()
    }
}

impl std::fmt::Display for ContractViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}/{}] {}: {} (at {})",
            self.severity, self.kind, self.algorithm, self.message, self.location
        )
    }
}

/// Receives reported violations.
///
/// With the `sync-send` feature, observers must be `Send + Sync`.
#[cfg(feature = "sync-send")]
pub trait ViolationObserver: Send + Sync {
    /// Called synchronously from the seeding path.
    fn on_violation(&self, violation: &ContractViolation);
}

/// Receives reported violations.
#[cfg(not(feature = "sync-send"))]
pub trait ViolationObserver {
    /// Called synchronously from the seeding path.
    fn on_violation(&self, violation: &ContractViolation);
}

/// Logs violations through `tracing`: `Warning` as `warn!`, `Error` as `error!`.
#[derive(Debug, Default, Clone)]
pub struct TracingObserver;

impl TracingObserver {
    /// Creates a tracing observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ViolationObserver for TracingObserver {
    fn on_violation(&self, violation: &ContractViolation) {
        let kind = violation.kind.as_str();
        let algorithm = violation.algorithm;
        let location = violation.location;
        match violation.severity {
            ViolationSeverity::Warning => {
                tracing::warn!(kind, algorithm, location, "{}", violation.message);
            },
            ViolationSeverity::Error => {
                tracing::error!(kind, algorithm, location, "{}", violation.message);
            },
        }
    }
}

/// Keeps every violation it sees, for assertions in tests.
///
/// # Example
///
/// ```
/// use fortress_random::engines::Seiran;
/// use fortress_random::telemetry::{with_observer, CollectingObserver, ViolationKind};
/// use std::sync::Arc;
///
/// let observer = Arc::new(CollectingObserver::new());
/// let _rng = with_observer(observer.clone(), || Seiran::new(0, 0));
///
/// assert_eq!(observer.len(), 1);
/// assert_eq!(observer.violations()[0].algorithm, "Seiran");
/// ```
#[derive(Debug, Default)]
pub struct CollectingObserver {
    violations: Mutex<Vec<ContractViolation>>,
}

impl CollectingObserver {
    /// Creates an observer with nothing collected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every collected violation, oldest first.
    #[must_use]
    pub fn violations(&self) -> Vec<ContractViolation> {
        self.violations.lock().clone()
    }

    /// Number of collected violations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.lock().len()
    }

    /// True if nothing has been reported.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.lock().is_empty()
    }

    /// True if any collected violation has this kind.
    #[must_use]
    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations.lock().iter().any(|v| v.kind == kind)
    }

    /// Collected violations of one kind, oldest first.
    #[must_use]
    pub fn violations_of_kind(&self, kind: ViolationKind) -> Vec<ContractViolation> {
        self.violations
            .lock()
            .iter()
            .filter(|v| v.kind == kind)
            .cloned()
            .collect()
    }
}

impl ViolationObserver for CollectingObserver {
    fn on_violation(&self, violation: &ContractViolation) {
        self.violations.lock().push(violation.clone());
    }
}

thread_local! {
    static SCOPED_OBSERVER: RefCell<Option<Arc<dyn ViolationObserver>>> = const { RefCell::new(None) };
}

/// Puts the outer observer back when a scope ends, including by unwinding.
struct ScopeGuard {
    previous: Option<Arc<dyn ViolationObserver>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        let previous = self.previous.take();
        SCOPED_OBSERVER.with(|slot| *slot.borrow_mut() = previous);
    }
}

/// Runs `f` with `observer` receiving every violation reported on this thread.
///
/// Scopes nest. The previous observer is restored when `f` returns or panics.
pub fn with_observer<R>(observer: Arc<dyn ViolationObserver>, f: impl FnOnce() -> R) -> R {
    let _guard = ScopeGuard {
        previous: SCOPED_OBSERVER.with(|slot| slot.borrow_mut().replace(observer)),
    };
    f()
}

/// Delivers a violation to the scoped observer, or to [`TracingObserver`] if none is set.
///
/// This is what [`report_violation!`] expands to.
pub fn dispatch(violation: &ContractViolation) {
    let scoped = SCOPED_OBSERVER.with(|slot| slot.borrow().clone());
    match scoped {
        Some(observer) => observer.on_violation(violation),
        None => TracingObserver.on_violation(violation),
    }
}

/// Reports a seed repair with the caller's `file:line`.
///
/// ```text
/// report_violation!(severity, kind, algorithm, "message");
/// report_violation!(severity, kind, algorithm, "message with {}", args);
/// ```
///
/// # Example
///
/// ```
/// use fortress_random::{report_violation, telemetry::{ViolationSeverity, ViolationKind}};
///
/// report_violation!(ViolationSeverity::Warning, ViolationKind::DegenerateSeed,
///     "Seiran", "all-zero state replaced after {} words", 2);
/// ```
#[macro_export]
macro_rules! report_violation {
    ($severity:expr, $kind:expr, $algorithm:expr, $msg:literal) => {{
        let violation = $crate::telemetry::ContractViolation::new(
            $severity,
            $kind,
            $algorithm,
            $msg,
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::dispatch(&violation);
    }};

    ($severity:expr, $kind:expr, $algorithm:expr, $fmt:literal, $($arg:tt)+) => {{
        let violation = $crate::telemetry::ContractViolation::new(
            $severity,
            $kind,
            $algorithm,
            format!($fmt, $($arg)+),
            concat!(file!(), ":", line!()),
        );
        $crate::telemetry::dispatch(&violation);
    }};
}

#[cfg(test)]
#[allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing
)]
mod tests {
    use super::*;
    use std::panic::{catch_unwind, AssertUnwindSafe};

    fn warning(kind: ViolationKind) -> ContractViolation {
        ContractViolation::new(ViolationSeverity::Warning, kind, "Test", "test", "test.rs:1")
    }

    #[test]
    fn test_violation_display() {
        let violation = ContractViolation::new(
            ViolationSeverity::Error,
            ViolationKind::InternalError,
            "Seiran",
            "expanded seed rejected",
            "test.rs:10",
        );
        assert_eq!(
            violation.to_string(),
            "[error/internal_error] Seiran: expanded seed rejected (at test.rs:10)"
        );
    }

    #[test]
    fn test_collecting_observer_filters_by_kind() {
        let observer = CollectingObserver::new();
        assert!(observer.is_empty());

        observer.on_violation(&warning(ViolationKind::DegenerateSeed));
        observer.on_violation(&warning(ViolationKind::SeedAdjusted));
        observer.on_violation(&warning(ViolationKind::DegenerateSeed));

        assert_eq!(observer.len(), 3);
        assert_eq!(observer.violations_of_kind(ViolationKind::DegenerateSeed).len(), 2);
        assert!(!observer.has_violation(ViolationKind::InternalError));
    }

    #[test]
    fn test_report_violation_macro_reaches_scoped_observer() {
        let observer = Arc::new(CollectingObserver::new());
        with_observer(observer.clone(), || {
            report_violation!(
                ViolationSeverity::Warning,
                ViolationKind::SeedAdjusted,
                "L32X64Mix",
                "plain message"
            );
            report_violation!(
                ViolationSeverity::Error,
                ViolationKind::InternalError,
                "Sfc64",
                "formatted {} {}",
                1,
                2
            );
        });

        let violations = observer.violations();
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].algorithm, "L32X64Mix");
        assert!(violations[0].location.contains("telemetry.rs"));
        assert_eq!(violations[1].message, "formatted 1 2");
        assert_eq!(violations[1].severity, ViolationSeverity::Error);
    }

    #[test]
    fn test_scoped_observer_is_restored() {
        let outer = Arc::new(CollectingObserver::new());
        let inner = Arc::new(CollectingObserver::new());

        with_observer(outer.clone(), || {
            with_observer(inner.clone(), || {
                report_violation!(
                    ViolationSeverity::Warning,
                    ViolationKind::DegenerateSeed,
                    "Test",
                    "inner"
                );
            });
            report_violation!(
                ViolationSeverity::Warning,
                ViolationKind::DegenerateSeed,
                "Test",
                "outer"
            );
        });
        // outside any scope: goes to tracing, not to the collectors
        report_violation!(
            ViolationSeverity::Warning,
            ViolationKind::DegenerateSeed,
            "Test",
            "none"
        );

        assert_eq!(inner.len(), 1);
        assert_eq!(outer.len(), 1);
        assert_eq!(outer.violations()[0].message, "outer");
    }

    #[test]
    fn test_scoped_observer_is_restored_after_panic() {
        let outer = Arc::new(CollectingObserver::new());
        let inner = Arc::new(CollectingObserver::new());

        with_observer(outer.clone(), || {
            let unwound = catch_unwind(AssertUnwindSafe(|| {
                with_observer(inner.clone(), || panic!("seeding failed"))
            }));
            assert!(unwound.is_err());
            report_violation!(
                ViolationSeverity::Warning,
                ViolationKind::DegenerateSeed,
                "Test",
                "after unwind"
            );
        });
        report_violation!(
            ViolationSeverity::Warning,
            ViolationKind::DegenerateSeed,
            "Test",
            "unscoped"
        );

        assert!(inner.is_empty());
        assert_eq!(outer.len(), 1);
        assert_eq!(outer.violations()[0].message, "after unwind");
    }

    #[test]
    fn test_tracing_observer_all_severities() {
        let observer = TracingObserver::new();
        for severity in [ViolationSeverity::Warning, ViolationSeverity::Error] {
            observer.on_violation(&ContractViolation::new(
                severity,
                ViolationKind::DegenerateSeed,
                "Test",
                "logged",
                "test.rs:1",
            ));
        }
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_violation_to_json() {
        let json = warning(ViolationKind::DegenerateSeed).to_json().unwrap();
        assert!(json.contains(r#""severity":"warning""#));
        assert!(json.contains(r#""kind":"degenerate_seed""#));
        assert!(json.contains(r#""algorithm":"Test""#));
    }
}
