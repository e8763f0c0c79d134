//! Activation state machine: decides when to arm, disarm or power the output.
//!
//! The only persisted state is the [`TriggerState`] behind the
//! [`TriggerStateStore`]; every decision is a function of that read plus
//! the current [`TimeWindow`]. Powering the output is always preceded by a
//! successful disarm, so a stale `Armed` can never fire twice. If the
//! disarm fails the actuator is not touched.

use tracing::info;

use armplug_domain::error::ArmPlugError;
use armplug_domain::event::ActivationEvent;
use armplug_domain::time_window::{TimeWindow, WindowPolicy};
use armplug_domain::trigger::TriggerState;

use crate::ports::{Clock, PowerActuator, TriggerStateStore};

/// Why the output was powered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerOnReason {
    /// Toggled during the weekend.
    Weekend,
    /// Toggled during weekday happy hour.
    HappyHour,
    /// The schedule fired while armed.
    Fired,
}

impl std::fmt::Display for PowerOnReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekend => f.write_str("weekend"),
            Self::HappyHour => f.write_str("happy_hour"),
            Self::Fired => f.write_str("fired"),
        }
    }
}

/// Result of a handled [`ActivationEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The trigger went from disarmed to armed.
    Armed,
    /// The trigger went from armed to disarmed.
    Disarmed,
    /// The trigger was reset and the output switched on.
    PoweredOn(PowerOnReason),
    /// A fire arrived while disarmed; nothing changed.
    NotArmed,
}

/// The arm/disarm/fire state machine.
pub struct ActivationMachine<S, A, C> {
    store: S,
    actuator: A,
    clock: C,
    window: WindowPolicy,
}

impl<S, A, C> ActivationMachine<S, A, C>
where
    S: TriggerStateStore,
    A: PowerActuator,
    C: Clock,
{
    /// Create a new machine.
    pub fn new(store: S, actuator: A, clock: C, window: WindowPolicy) -> Self {
        Self {
            store,
            actuator,
            clock,
            window,
        }
    }

    /// Handle a single activation event.
    ///
    /// # Errors
    ///
    /// Returns [`ArmPlugError::Read`] or [`ArmPlugError::Write`] when the
    /// trigger state cannot be read or written, and
    /// [`ArmPlugError::Actuator`] when switching the output fails. On error
    /// the trigger state is left as it was before the failing call.
    pub async fn handle(&self, event: ActivationEvent) -> Result<Outcome, ArmPlugError> {
        match event {
            ActivationEvent::ToggleRequested => self.toggle().await,
            ActivationEvent::FireRequested => self.fire().await,
        }
    }

    async fn toggle(&self) -> Result<Outcome, ArmPlugError> {
        let window = self.window.classify_at(&self.clock.now());
        match window {
            TimeWindow::Weekend => self.power_on(PowerOnReason::Weekend).await,
            TimeWindow::HappyHourImmediate => self.power_on(PowerOnReason::HappyHour).await,
            TimeWindow::Normal => {
                let current = self.store.get_state().await?;
                let next = current.toggled();
                self.store.set_state(next).await?;
                info!(from = %current, to = %next, "trigger toggled");
                Ok(match next {
                    TriggerState::Armed => Outcome::Armed,
                    TriggerState::Disarmed => Outcome::Disarmed,
                })
            }
        }
    }

    async fn fire(&self) -> Result<Outcome, ArmPlugError> {
        match self.store.get_state().await? {
            TriggerState::Armed => self.power_on(PowerOnReason::Fired).await,
            TriggerState::Disarmed => {
                info!("trigger was not armed, ignoring fire");
                Ok(Outcome::NotArmed)
            }
        }
    }

    async fn power_on(&self, reason: PowerOnReason) -> Result<Outcome, ArmPlugError> {
        self.store.set_state(TriggerState::Disarmed).await?;
        self.actuator.power_on().await?;
        info!(%reason, "output powered on, trigger disarmed");
        Ok(Outcome::PoweredOn(reason))
    }
}
