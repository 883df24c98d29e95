use crate::app::App;
use crate::features::TimerControl;
use anyhow::Result;
use calloop::timer::{TimeoutAction, Timer};
use calloop::{LoopHandle, RegistrationToken};
use log::{debug, info};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    RiderTick,
    StageTick,
    EtaTick,
    SubmitOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Every(Duration),
    Once(Duration),
}

impl Schedule {
    fn first_delay(self) -> Duration {
        match self {
            Schedule::Every(d) | Schedule::Once(d) => d,
        }
    }
}

/// Armed timers, one per kind.
///
/// Without a loop handle the registry only remembers what is armed, and
/// ticks are delivered by calling [`App::on_timer`] directly.
pub struct Timers {
    handle: Option<LoopHandle<'static, App>>,
    armed: HashMap<TimerKind, Option<RegistrationToken>>,
}

impl Timers {
    #[cfg(test)]
    pub fn detached() -> Self {
        Self {
            handle: None,
            armed: HashMap::new(),
        }
    }

    pub fn attached(handle: LoopHandle<'static, App>) -> Self {
        Self {
            handle: Some(handle),
            armed: HashMap::new(),
        }
    }

    pub fn arm(&mut self, kind: TimerKind, schedule: Schedule) -> Result<()> {
        self.cancel(kind);

        let token = match &self.handle {
            Some(handle) => {
                let timer = Timer::from_duration(schedule.first_delay());
                let token = handle
                    .insert_source(timer, move |_deadline, _, app: &mut App| {
                        fire(app, kind, schedule)
                    })
                    .map_err(|e| anyhow::anyhow!("Failed to arm {:?} timer: {}", kind, e.error))?;
                Some(token)
            }
            None => None,
        };

        debug!("Armed {:?} ({:?})", kind, schedule);
        self.armed.insert(kind, token);
        Ok(())
    }

    pub fn cancel(&mut self, kind: TimerKind) {
        if let Some(token) = self.armed.remove(&kind) {
            if let (Some(handle), Some(token)) = (&self.handle, token) {
                handle.remove(token);
            }
            info!("Cancelled {:?} timer", kind);
        }
    }

    pub fn cancel_all(&mut self, kinds: &[TimerKind]) {
        for kind in kinds {
            self.cancel(*kind);
        }
    }

    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains_key(&kind)
    }

    pub fn armed_count(&self) -> usize {
        self.armed.len()
    }

    /// Drops the bookkeeping for a timer whose source already removed itself.
    pub fn forget(&mut self, kind: TimerKind) {
        self.armed.remove(&kind);
    }
}

fn fire(app: &mut App, kind: TimerKind, schedule: Schedule) -> TimeoutAction {
    if !app.timers.is_armed(kind) {
        return TimeoutAction::Drop;
    }
    match (app.on_timer(kind), schedule) {
        (TimerControl::Continue, Schedule::Every(interval)) => TimeoutAction::ToDuration(interval),
        (TimerControl::Continue | TimerControl::Stop, _) => {
            app.timers.forget(kind);
            TimeoutAction::Drop
        }
    }
}
