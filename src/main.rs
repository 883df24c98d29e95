mod app;
mod catalog;
mod config;
mod features;
mod geo;
mod timer;

use anyhow::Result;
use app::{App, Page, UiEvent};
use calloop::EventLoop;
use config::Config;
use features::checkout::CheckoutForm;
use features::listing::SortBy;
use features::menu_item::format_price;
use features::order_tracker::{OrderStage, StageStatus, StageTracker};
use log::{info, warn};
use std::time::Duration;
use timer::Timers;

/// One line per stage: done, current, or still to come.
fn tracker_line(stages: &StageTracker) -> String {
    OrderStage::ALL
        .iter()
        .map(|stage| {
            let mark = match stages.status(*stage) {
                StageStatus::Completed => "x",
                StageStatus::Active => ">",
                StageStatus::Pending => " ",
            };
            format!("[{}] {}", mark, stage)
        })
        .collect::<Vec<_>>()
        .join("  ")
}

fn demo_script() -> Vec<UiEvent> {
    let toggle = |option_id: &str, choice_id: &str| UiEvent::ToggleChoice {
        option_id: option_id.to_string(),
        choice_id: choice_id.to_string(),
    };
    vec![
        UiEvent::Search("asian".to_string()),
        UiEvent::ToggleCuisine("Japanese".to_string()),
        UiEvent::ToggleCuisine("Vietnamese".to_string()),
        UiEvent::SetMinRating(Some(4)),
        UiEvent::SetMaxDeliveryTime(40),
        UiEvent::Sort(SortBy::DeliveryTime),
        UiEvent::Navigate(Page::Restaurant { id: 1 }),
        UiEvent::OpenItem(3),
        toggle("rice-option", "white"),
        UiEvent::DismissItem,
        UiEvent::OpenItem(3),
        toggle("rice-option", "brown"),
        toggle("extras", "avocado"),
        toggle("extras", "cream-cheese"),
        toggle("extras", "cream-cheese"),
        UiEvent::IncrementQuantity,
        UiEvent::IncrementQuantity,
        UiEvent::DecrementQuantity,
        UiEvent::AddToCart,
        UiEvent::OpenItem(2),
        UiEvent::Navigate(Page::Checkout),
        UiEvent::SelectTip(20),
        UiEvent::PlaceOrder(CheckoutForm {
            full_name: "John Doe".to_string(),
            address: "123 Main St".to_string(),
            city: "Anytown".to_string(),
            zip_code: "12345".to_string(),
            card_name: "John Doe".to_string(),
            card_number: "4242424242424242".to_string(),
            expiry_date: "12/29".to_string(),
            cvc: "123".to_string(),
        }),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting dishdash...");

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Falling back to default config: {}", e);
        Config::default()
    });

    let mut event_loop: EventLoop<'static, App> = EventLoop::try_new()?;
    let mut app = App::new(config, Timers::attached(event_loop.handle()));

    for event in demo_script() {
        app.handle_event(event)?;
    }
    for restaurant in app.visible_restaurants() {
        info!("  {}", restaurant.card_line());
    }

    info!("Starting main loop...");
    let mut last_stage = None;
    let mut last_eta = None;
    while app.timers.armed_count() > 0 {
        event_loop.dispatch(Some(Duration::from_millis(16)), &mut app)?;

        let Some(view) = &app.tracking else {
            continue;
        };
        if last_stage != Some(view.stages.current()) {
            last_stage = Some(view.stages.current());
            info!("{}", view.stages.headline());
            info!("{}", tracker_line(&view.stages));
        }
        if last_eta != Some(view.eta.value()) {
            last_eta = Some(view.eta.value());
            info!(
                "ETA {}%, rider at {} ({:.0}% of the way)",
                view.eta.value(),
                view.journey.position(),
                view.journey.progress() * 100.0
            );
        }
    }

    if let (true, Some(order)) = (app.tracking_finished(), &app.order) {
        info!(
            "Order #{} delivered, total {}",
            order.number,
            format_price(order.summary.total)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracker_line_marks_each_stage() {
        let stages = StageTracker::new();
        assert_eq!(
            tracker_line(&stages),
            "[>] Confirmed  [ ] In the Kitchen  [ ] On its way  [ ] Delivered"
        );
    }

    #[test]
    fn demo_script_ends_with_a_pending_order() {
        let mut app = App::new(Config::default(), Timers::detached());
        for event in demo_script() {
            app.handle_event(event).unwrap();
        }
        assert_eq!(app.page, Page::Checkout);
        assert!(app.placing.is_some());
        assert_eq!(app.tip_percent, 20);
        assert_eq!(app.cart.lines().len(), 5);

        let roll = &app.cart.lines()[3];
        assert_eq!((roll.unit_price, roll.quantity), (11.5, 2));
        let names: Vec<_> = app.visible_restaurants().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Sushi Palace", "Noodle House"]);
    }
}
