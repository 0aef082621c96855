//! In-flight ability casts.
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, warn};

use super::{AbilityDefinition, EffectError, EffectStep};
use crate::cancel::CancelToken;
use crate::error::ArenaError;
use crate::types::{AbilityId, EntityId};

/// Summary of a finished (or aborted) cast, for logs and telemetry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastOutcome {
    pub ability: AbilityId,
    /// Effects that were executed, successful or not.
    pub resolved: usize,
    /// Effects in the pipeline.
    pub total: usize,
    /// `true` when every executed effect reported success.
    pub succeeded: bool,
    pub cancelled: bool,
}

/// Where a cast stands after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastProgress {
    Pending,
    Completed(CastOutcome),
    Cancelled(CastOutcome),
}

impl CastProgress {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    pub fn outcome(&self) -> Option<CastOutcome> {
        match self {
            Self::Pending => None,
            Self::Completed(outcome) | Self::Cancelled(outcome) => Some(*outcome),
        }
    }
}

/// One execution of an ability's effect pipeline.
///
/// Driven by the owning state machine through [`step`](Self::step). The first
/// step is the cast frame and consumes no time; later steps advance the cast
/// clock by `dt`. Cancellation is observed before every effect.
#[derive(Debug)]
pub struct AbilityCast {
    definition: Arc<AbilityDefinition>,
    caster: EntityId,
    target: Option<EntityId>,
    cancel: CancelToken,
    cursor: usize,
    elapsed: Duration,
    next_due: Duration,
    started: bool,
    succeeded: bool,
    progress: CastProgress,
}

impl AbilityCast {
    pub(crate) fn new(
        definition: Arc<AbilityDefinition>,
        caster: EntityId,
        target: Option<EntityId>,
        cancel: CancelToken,
    ) -> Self {
        let next_due = definition
            .steps
            .first()
            .map_or(Duration::ZERO, |step| step.delay);
        Self {
            definition,
            caster,
            target,
            cancel,
            cursor: 0,
            elapsed: Duration::ZERO,
            next_due,
            started: false,
            succeeded: true,
            progress: CastProgress::Pending,
        }
    }

    pub fn ability(&self) -> AbilityId {
        self.definition.id
    }

    pub fn caster(&self) -> EntityId {
        self.caster
    }

    pub fn target(&self) -> Option<EntityId> {
        self.target
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn progress(&self) -> CastProgress {
        self.progress
    }

    pub fn is_finished(&self) -> bool {
        self.progress.is_finished()
    }

    /// Whether the cast was, or is about to be, cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.progress, CastProgress::Cancelled(_))
            || (!self.is_finished() && self.cancel.is_cancelled())
    }

    /// Signals cancellation. Observed at the next step.
    pub fn request_cancel(&self) {
        self.cancel.cancel();
    }

    /// Advances the cast clock and applies every effect that has come due.
    pub fn step(&mut self, dt: Duration) -> CastProgress {
        if self.is_finished() {
            return self.progress;
        }
        if self.started {
            self.elapsed += dt;
        } else {
            self.started = true;
        }

        loop {
            if self.cancel.is_cancelled() {
                return self.finish(true);
            }
            let Some(step) = self.definition.steps.get(self.cursor).cloned() else {
                return self.finish(false);
            };
            if self.elapsed < self.next_due {
                return CastProgress::Pending;
            }

            self.apply(&step);
            self.cursor += 1;
            if let Some(next) = self.definition.steps.get(self.cursor) {
                self.next_due += next.delay;
            }
        }
    }

    /// Stops the cast where it is. Effects not yet applied never run.
    pub fn abort(&mut self) -> CastProgress {
        if self.is_finished() {
            return self.progress;
        }
        self.finish(true)
    }

    fn apply(&mut self, step: &EffectStep) {
        let (caster, target) = (self.caster, self.target);
        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            step.effect.execute(caster, target)
        }))
        .unwrap_or_else(|payload| Err(EffectError::Panicked(panic_message(&*payload))));
        match result {
            Ok(true) => {}
            Ok(false) => {
                self.succeeded = false;
                debug!(
                    target: "arena::ability",
                    caster = %self.caster,
                    ability = %self.definition.id,
                    effect = step.effect.name(),
                    "effect did not take hold"
                );
            }
            Err(e) => {
                self.succeeded = false;
                if e.severity().is_internal() {
                    error!(
                        target: "arena::ability",
                        caster = %self.caster,
                        ability = %self.definition.id,
                        effect = step.effect.name(),
                        code = e.error_code(),
                        error = %e,
                        "effect failed"
                    );
                } else {
                    warn!(
                        target: "arena::ability",
                        caster = %self.caster,
                        ability = %self.definition.id,
                        effect = step.effect.name(),
                        code = e.error_code(),
                        error = %e,
                        "effect failed"
                    );
                }
            }
        }
    }

    fn finish(&mut self, cancelled: bool) -> CastProgress {
        let outcome = CastOutcome {
            ability: self.definition.id,
            resolved: self.cursor,
            total: self.definition.steps.len(),
            succeeded: self.succeeded,
            cancelled,
        };
        self.progress = if cancelled {
            CastProgress::Cancelled(outcome)
        } else {
            CastProgress::Completed(outcome)
        };
        debug!(
            target: "arena::ability",
            caster = %self.caster,
            ability = %outcome.ability,
            resolved = outcome.resolved,
            total = outcome.total,
            succeeded = outcome.succeeded,
            cancelled,
            "cast finished"
        );
        self.progress
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::ability::{EffectError, EffectExecutor};

    #[derive(Default)]
    struct Recorder {
        hits: Mutex<Vec<&'static str>>,
    }

    struct Mark {
        label: &'static str,
        result: Result<bool, EffectError>,
        log: Arc<Recorder>,
    }

    impl EffectExecutor for Mark {
        fn name(&self) -> &str {
            self.label
        }

        fn execute(&self, _: EntityId, _: Option<EntityId>) -> Result<bool, EffectError> {
            self.log.hits.lock().unwrap().push(self.label);
            self.result.clone()
        }
    }

    fn mark(log: &Arc<Recorder>, label: &'static str) -> Arc<dyn EffectExecutor> {
        Arc::new(Mark {
            label,
            result: Ok(true),
            log: Arc::clone(log),
        })
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn cast(definition: AbilityDefinition, cancel: CancelToken) -> AbilityCast {
        AbilityCast::new(Arc::new(definition), EntityId(1), Some(EntityId(2)), cancel)
    }

    #[test]
    fn effects_apply_in_order_with_cumulative_delays() {
        let log = Arc::new(Recorder::default());
        let definition = AbilityDefinition::new(AbilityId(1), "leap", Duration::from_secs(2))
            .then(mark(&log, "windup"))
            .then_after(ms(1200), mark(&log, "land"))
            .then_after(ms(100), mark(&log, "shockwave"));
        let mut cast = cast(definition, CancelToken::new());

        assert_eq!(cast.step(ms(100)), CastProgress::Pending);
        assert_eq!(*log.hits.lock().unwrap(), ["windup"]);

        for _ in 0..11 {
            assert_eq!(cast.step(ms(100)), CastProgress::Pending);
        }
        assert_eq!(*log.hits.lock().unwrap(), ["windup"]);

        assert_eq!(cast.step(ms(100)), CastProgress::Pending);
        assert_eq!(*log.hits.lock().unwrap(), ["windup", "land"]);

        let progress = cast.step(ms(100));
        assert_eq!(*log.hits.lock().unwrap(), ["windup", "land", "shockwave"]);
        let outcome = progress.outcome().unwrap();
        assert!(matches!(progress, CastProgress::Completed(_)));
        assert_eq!(outcome.resolved, 3);
        assert!(outcome.succeeded);
    }

    #[test]
    fn immediate_pipeline_completes_on_cast_frame() {
        let log = Arc::new(Recorder::default());
        let definition = AbilityDefinition::new(AbilityId(1), "jab", ms(500))
            .then(mark(&log, "a"))
            .then(mark(&log, "b"));
        let mut cast = cast(definition, CancelToken::new());

        assert!(matches!(cast.step(ms(16)), CastProgress::Completed(_)));
        assert_eq!(*log.hits.lock().unwrap(), ["a", "b"]);
    }

    #[test]
    fn cancel_before_first_step_applies_nothing() {
        let log = Arc::new(Recorder::default());
        let definition = AbilityDefinition::new(AbilityId(1), "jab", ms(500))
            .then(mark(&log, "a"))
            .then_after(ms(300), mark(&log, "b"));
        let token = CancelToken::new();
        let mut cast = cast(definition, token.clone());

        token.cancel();
        assert!(cast.is_cancelled());
        let progress = cast.step(ms(100));
        assert!(matches!(progress, CastProgress::Cancelled(_)));
        assert_eq!(progress.outcome().unwrap().resolved, 0);
        assert!(log.hits.lock().unwrap().is_empty());
    }

    #[test]
    fn cancel_mid_pipeline_skips_remaining_effects() {
        let log = Arc::new(Recorder::default());
        let definition = AbilityDefinition::new(AbilityId(1), "combo", ms(500))
            .then(mark(&log, "a"))
            .then_after(ms(300), mark(&log, "b"));
        let token = CancelToken::new();
        let mut cast = cast(definition, token.clone());

        cast.step(ms(100));
        token.cancel();
        for _ in 0..5 {
            cast.step(ms(100));
        }
        assert_eq!(*log.hits.lock().unwrap(), ["a"]);
        assert_eq!(cast.progress().outcome().unwrap().resolved, 1);
        assert!(cast.progress().outcome().unwrap().cancelled);
    }

    #[test]
    fn failing_effect_does_not_stop_pipeline() {
        let log = Arc::new(Recorder::default());
        let failing: Arc<dyn EffectExecutor> = Arc::new(Mark {
            label: "miss",
            result: Err(EffectError::TargetGone(EntityId(2))),
            log: Arc::clone(&log),
        });
        let definition = AbilityDefinition::new(AbilityId(1), "volley", ms(500))
            .then(failing)
            .then(mark(&log, "hit"));
        let mut cast = cast(definition, CancelToken::new());

        let outcome = cast.step(ms(0)).outcome().unwrap();
        assert_eq!(*log.hits.lock().unwrap(), ["miss", "hit"]);
        assert_eq!(outcome.resolved, 2);
        assert!(!outcome.succeeded);
    }

    #[test]
    fn finished_cast_is_inert() {
        let log = Arc::new(Recorder::default());
        let definition =
            AbilityDefinition::new(AbilityId(1), "jab", ms(500)).then(mark(&log, "a"));
        let token = CancelToken::new();
        let mut cast = cast(definition, token.clone());

        let done = cast.step(ms(0));
        token.cancel();
        assert_eq!(cast.step(ms(100)), done);
        assert_eq!(cast.abort(), done);
        assert!(!cast.is_cancelled());
    }

    struct Explode;

    impl EffectExecutor for Explode {
        fn name(&self) -> &str {
            "explode"
        }

        fn execute(&self, _: EntityId, _: Option<EntityId>) -> Result<bool, EffectError> {
            panic!("executor bug")
        }
    }

    #[test]
    fn panicking_effect_is_contained() {
        let log = Arc::new(Recorder::default());
        let definition = AbilityDefinition::new(AbilityId(1), "volatile", ms(500))
            .then(Arc::new(Explode))
            .then(mark(&log, "after"));
        let mut cast = cast(definition, CancelToken::new());

        let outcome = cast.step(ms(0)).outcome().unwrap();
        assert_eq!(*log.hits.lock().unwrap(), ["after"]);
        assert_eq!(outcome.resolved, 2);
        assert!(!outcome.succeeded);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn panic_payload_becomes_internal_error() {
        let err = EffectError::Panicked(panic_message(&"executor bug"));
        assert_eq!(err, EffectError::Panicked("executor bug".into()));
        assert!(err.severity().is_internal());
        assert_eq!(err.error_code(), "effect.panicked");
        assert_eq!(panic_message(&String::from("owned")), "owned");
        assert_eq!(panic_message(&7_u8), "non-string panic payload");
    }
}
