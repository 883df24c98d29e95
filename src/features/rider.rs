use super::{Ticking, TimerControl};
use crate::config::TrackingConfig;
use crate::geo::{
    anim::{interpolate, step_progress},
    math::Point,
};
use log::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JourneyMode {
    Idle,
    Running { step: u32 },
    Completed,
}

/// The rider marker moving from the restaurant to the customer.
#[derive(Debug, Clone)]
pub struct Journey {
    pub mode: JourneyMode,
    start: Point,
    end: Point,
    position: Point,
    progress: f64,
    total_steps: u32,
}

impl Journey {
    pub fn new(start: Point, end: Point, total_steps: u32) -> Self {
        Self {
            mode: JourneyMode::Idle,
            start,
            end,
            position: start,
            progress: 0.0,
            total_steps,
        }
    }

    pub fn from_config(config: &TrackingConfig) -> Self {
        Self::new(config.restaurant, config.customer, config.total_steps())
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    pub fn end_point(&self) -> Point {
        self.end
    }

    #[cfg(test)]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Progress of the last rendered position.
    pub fn progress(&self) -> f64 {
        self.progress
    }
}

impl Ticking for Journey {
    fn name(&self) -> &'static str {
        "rider"
    }

    fn start(&mut self) {
        if matches!(self.mode, JourneyMode::Idle) {
            self.mode = JourneyMode::Running { step: 0 };
            self.position = self.start;
            info!("Rider left the restaurant at {}", self.start);
        }
    }

    fn tick(&mut self) -> TimerControl {
        match &mut self.mode {
            JourneyMode::Idle | JourneyMode::Completed => TimerControl::Stop,
            JourneyMode::Running { step } => {
                if *step > self.total_steps {
                    self.position = self.end;
                    self.progress = 1.0;
                    self.mode = JourneyMode::Completed;
                    info!("Rider arrived at {}", self.end);
                    return TimerControl::Stop;
                }
                self.progress = step_progress(*step, self.total_steps);
                self.position = interpolate(self.start, self.end, self.progress);
                debug!("Rider step {}/{}: {}", step, self.total_steps, self.position);
                *step += 1;
                TimerControl::Continue
            }
        }
    }

    fn is_complete(&self) -> bool {
        matches!(self.mode, JourneyMode::Completed)
    }
}
