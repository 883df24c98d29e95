pub mod checkout;
pub mod listing;
pub mod menu_item;
pub mod order_tracker;
pub mod rider;

/// What a timer callback wants done with its timer after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerControl {
    Continue,
    Stop,
}

/// A feature driven by a fixed-cadence timer: `Idle -> Running -> Completed`.
pub trait Ticking {
    fn name(&self) -> &'static str;
    fn start(&mut self);
    fn tick(&mut self) -> TimerControl;
    fn is_complete(&self) -> bool;
}
