use super::{Ticking, TimerControl};
use crate::config::TrackingConfig;
use log::info;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrderStage {
    Confirmed,
    InTheKitchen,
    OnItsWay,
    Delivered,
}

impl OrderStage {
    pub const ALL: [OrderStage; 4] = [
        OrderStage::Confirmed,
        OrderStage::InTheKitchen,
        OrderStage::OnItsWay,
        OrderStage::Delivered,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<OrderStage> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStage::Confirmed => "Confirmed",
            OrderStage::InTheKitchen => "In the Kitchen",
            OrderStage::OnItsWay => "On its way",
            OrderStage::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a stage is drawn relative to the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Active,
    Pending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerMode {
    Idle,
    Running,
    Completed,
}

#[derive(Debug, Clone)]
pub struct StageTracker {
    pub mode: TrackerMode,
    current: OrderStage,
}

impl StageTracker {
    pub fn new() -> Self {
        Self {
            mode: TrackerMode::Idle,
            current: OrderStage::Confirmed,
        }
    }

    pub fn current(&self) -> OrderStage {
        self.current
    }

    pub fn status(&self, stage: OrderStage) -> StageStatus {
        match stage.cmp(&self.current) {
            std::cmp::Ordering::Less => StageStatus::Completed,
            std::cmp::Ordering::Equal => StageStatus::Active,
            std::cmp::Ordering::Greater => StageStatus::Pending,
        }
    }

    pub fn headline(&self) -> &'static str {
        if self.current == OrderStage::Delivered {
            "Your Order has Arrived!"
        } else {
            "Your Order is on its Way!"
        }
    }
}

impl Default for StageTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Ticking for StageTracker {
    fn name(&self) -> &'static str {
        "order stages"
    }

    fn start(&mut self) {
        if self.mode == TrackerMode::Idle {
            self.mode = TrackerMode::Running;
        }
    }

    fn tick(&mut self) -> TimerControl {
        if self.mode != TrackerMode::Running {
            return TimerControl::Stop;
        }
        if let Some(next) = self.current.next() {
            self.current = next;
            info!("Order stage: {}", next);
        }
        if self.current.next().is_none() {
            self.mode = TrackerMode::Completed;
            return TimerControl::Stop;
        }
        TimerControl::Continue
    }

    fn is_complete(&self) -> bool {
        self.mode == TrackerMode::Completed
    }
}

/// The estimated-delivery progress bar, in percent.
#[derive(Debug, Clone)]
pub struct EtaProgress {
    pub mode: TrackerMode,
    value: u8,
    step: u8,
}

impl EtaProgress {
    pub const FULL: u8 = 100;

    /// A zero step would never fill the bar, so it counts as 1.
    pub fn new(start: u8, step: u8) -> Self {
        Self {
            mode: TrackerMode::Idle,
            value: start.min(Self::FULL),
            step: step.max(1),
        }
    }

    pub fn from_config(config: &TrackingConfig) -> Self {
        Self::new(config.eta_start, config.eta_step)
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl Ticking for EtaProgress {
    fn name(&self) -> &'static str {
        "eta"
    }

    fn start(&mut self) {
        if self.mode == TrackerMode::Idle {
            self.mode = TrackerMode::Running;
        }
    }

    fn tick(&mut self) -> TimerControl {
        if self.mode != TrackerMode::Running {
            return TimerControl::Stop;
        }
        self.value = self.value.saturating_add(self.step).min(Self::FULL);
        if self.value >= Self::FULL {
            self.mode = TrackerMode::Completed;
            return TimerControl::Stop;
        }
        TimerControl::Continue
    }

    fn is_complete(&self) -> bool {
        self.mode == TrackerMode::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_advance_one_per_tick_and_stop_when_delivered() {
        let mut tracker = StageTracker::new();
        tracker.start();
        assert_eq!(tracker.current(), OrderStage::Confirmed);

        assert_eq!(tracker.tick(), TimerControl::Continue);
        assert_eq!(tracker.current(), OrderStage::InTheKitchen);
        assert_eq!(tracker.tick(), TimerControl::Continue);
        assert_eq!(tracker.tick(), TimerControl::Stop);
        assert_eq!(tracker.current(), OrderStage::Delivered);
        assert!(tracker.is_complete());

        assert_eq!(tracker.tick(), TimerControl::Stop);
        assert_eq!(tracker.current(), OrderStage::Delivered);
    }

    #[test]
    fn idle_tracker_ignores_ticks() {
        let mut tracker = StageTracker::new();
        assert_eq!(tracker.tick(), TimerControl::Stop);
        assert_eq!(tracker.current(), OrderStage::Confirmed);
    }

    #[test]
    fn stage_status_and_headline() {
        let mut tracker = StageTracker::new();
        tracker.start();
        tracker.tick();
        assert_eq!(tracker.status(OrderStage::Confirmed), StageStatus::Completed);
        assert_eq!(tracker.status(OrderStage::InTheKitchen), StageStatus::Active);
        assert_eq!(tracker.status(OrderStage::Delivered), StageStatus::Pending);
        assert_eq!(tracker.headline(), "Your Order is on its Way!");

        tracker.tick();
        tracker.tick();
        assert_eq!(tracker.headline(), "Your Order has Arrived!");
    }

    #[test]
    fn eta_fills_to_exactly_full() {
        let mut eta = EtaProgress::from_config(&TrackingConfig::default());
        eta.start();
        assert_eq!(eta.value(), 10);

        let mut ticks = 1;
        while eta.tick() == TimerControl::Continue {
            ticks += 1;
        }
        // 10 + 4 * 22 = 98, the 23rd tick clamps to 100.
        assert_eq!(ticks, 23);
        assert_eq!(eta.value(), 100);
        assert!(eta.is_complete());
    }

    #[test]
    fn zero_eta_step_still_completes() {
        let config = TrackingConfig {
            eta_step: 0,
            ..TrackingConfig::default()
        };
        let mut eta = EtaProgress::from_config(&config);
        eta.start();
        assert_eq!(eta.tick(), TimerControl::Continue);
        assert_eq!(eta.value(), 11);

        let mut ticks = 1;
        while eta.tick() == TimerControl::Continue {
            ticks += 1;
        }
        assert_eq!(ticks, 89);
        assert!(eta.is_complete());
    }

    #[test]
    fn stage_labels() {
        let labels: Vec<_> = OrderStage::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(labels, ["Confirmed", "In the Kitchen", "On its way", "Delivered"]);
    }
}
