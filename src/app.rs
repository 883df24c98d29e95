use crate::catalog::{self, MenuSection, RestaurantDetails};
use crate::config::Config;
use crate::features::{
    checkout::{check_tip, Cart, CheckoutError, CheckoutForm, Order, OrderSummary},
    listing::{ListingFilter, Restaurant, SortBy},
    menu_item::{format_price, quick_add, ItemDialog},
    order_tracker::{EtaProgress, StageTracker},
    rider::Journey,
    Ticking, TimerControl,
};
use crate::timer::{Schedule, TimerKind, Timers};
use anyhow::Result;
use log::{debug, info, warn};

const TRACKING_TIMERS: [TimerKind; 3] = [TimerKind::RiderTick, TimerKind::StageTick, TimerKind::EtaTick];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Listing,
    Restaurant { id: u32 },
    Checkout,
    Tracking,
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    Navigate(Page),
    Search(String),
    ToggleCuisine(String),
    SetMinRating(Option<u8>),
    SetMaxDeliveryTime(u32),
    Sort(SortBy),
    OpenItem(u32),
    ToggleChoice { option_id: String, choice_id: String },
    IncrementQuantity,
    DecrementQuantity,
    AddToCart,
    DismissItem,
    SelectTip(u8),
    PlaceOrder(CheckoutForm),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

/// Everything the order-tracking page animates.
#[derive(Debug, Clone)]
pub struct TrackingView {
    pub journey: Journey,
    pub stages: StageTracker,
    pub eta: EtaProgress,
}

impl TrackingView {
    pub fn new(config: &Config) -> Self {
        Self {
            journey: Journey::from_config(&config.tracking),
            stages: StageTracker::new(),
            eta: EtaProgress::from_config(&config.tracking),
        }
    }

    fn feature_mut(&mut self, kind: TimerKind) -> Option<&mut dyn Ticking> {
        match kind {
            TimerKind::RiderTick => Some(&mut self.journey),
            TimerKind::StageTick => Some(&mut self.stages),
            TimerKind::EtaTick => Some(&mut self.eta),
            TimerKind::SubmitOrder => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.journey.is_complete() && self.stages.is_complete() && self.eta.is_complete()
    }
}

pub struct App {
    pub config: Config,
    pub page: Page,
    pub timers: Timers,

    // Browsing
    pub restaurants: Vec<Restaurant>,
    pub filter: ListingFilter,
    pub details: RestaurantDetails,
    pub menu: Vec<MenuSection>,
    pub dialog: Option<ItemDialog>,

    // Checkout
    pub cart: Cart,
    pub tip_percent: u8,
    pub placing: Option<OrderSummary>,
    pub order: Option<Order>,

    // Tracking
    pub tracking: Option<TrackingView>,

    pub notifications: Vec<Notification>,
}

impl App {
    pub fn new(config: Config, timers: Timers) -> Self {
        let tip_percent = check_tip(&config.checkout, config.checkout.default_tip).unwrap_or_else(|e| {
            let fallback = config.checkout.tip_options.first().copied().unwrap_or(0);
            warn!("Default tip: {}, using {}%", e, fallback);
            fallback
        });
        Self {
            config,
            page: Page::Home,
            timers,
            restaurants: catalog::restaurants(),
            filter: ListingFilter::default(),
            details: catalog::restaurant_details(),
            menu: catalog::menu(),
            dialog: None,
            cart: Cart::new(catalog::placeholder_cart()),
            tip_percent,
            placing: None,
            order: None,
            tracking: None,
            notifications: Vec::new(),
        }
    }

    pub fn handle_event(&mut self, event: UiEvent) -> Result<()> {
        match event {
            UiEvent::Navigate(page) => self.navigate(page)?,
            UiEvent::Search(query) => {
                self.filter = ListingFilter::with_query(query);
                self.navigate(Page::Listing)?;
            }
            UiEvent::ToggleCuisine(cuisine) => self.filter.toggle_cuisine(&cuisine),
            UiEvent::SetMinRating(rating) => self.filter.min_rating = rating,
            UiEvent::SetMaxDeliveryTime(minutes) => self.filter.set_max_delivery_time(minutes),
            UiEvent::Sort(sort) => self.filter.sort = sort,
            UiEvent::OpenItem(item_id) => self.open_item(item_id),
            UiEvent::ToggleChoice { option_id, choice_id } => {
                if let Some(dialog) = &mut self.dialog {
                    if dialog.toggle(&option_id, &choice_id) {
                        debug!("{}", dialog.add_label());
                    } else {
                        warn!("No choice {} in option {}", choice_id, option_id);
                    }
                }
            }
            UiEvent::IncrementQuantity => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.increment();
                    debug!("{}", dialog.add_label());
                }
            }
            UiEvent::DecrementQuantity => {
                if let Some(dialog) = &mut self.dialog {
                    dialog.decrement();
                    debug!("{}", dialog.add_label());
                }
            }
            UiEvent::AddToCart => self.add_to_cart(),
            UiEvent::DismissItem => {
                if let Some(mut dialog) = self.dialog.take() {
                    dialog.dismiss();
                }
            }
            UiEvent::SelectTip(percent) => match check_tip(&self.config.checkout, percent) {
                Ok(percent) => self.tip_percent = percent,
                Err(e) => warn!("{}", e),
            },
            UiEvent::PlaceOrder(form) => {
                if let Err(e) = self.place_order(&form) {
                    warn!("Order not placed: {}", e);
                    if let CheckoutError::Invalid(errors) = &e {
                        for error in errors {
                            warn!("  {}", error);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    pub fn navigate(&mut self, page: Page) -> Result<()> {
        self.unmount();
        info!("Navigating to {:?}", page);
        self.page = page;
        self.mount()
    }

    fn unmount(&mut self) {
        match self.page {
            Page::Restaurant { .. } => {
                if let Some(mut dialog) = self.dialog.take() {
                    dialog.dismiss();
                }
            }
            Page::Checkout => {
                if self.placing.take().is_some() {
                    self.timers.cancel(TimerKind::SubmitOrder);
                    info!("Order submission abandoned");
                }
            }
            Page::Tracking => {
                self.timers.cancel_all(&TRACKING_TIMERS);
                self.tracking = None;
            }
            Page::Home | Page::Listing => {}
        }
    }

    fn mount(&mut self) -> Result<()> {
        match self.page {
            Page::Listing => {
                info!("{} restaurants ready to deliver", self.visible_restaurants().len());
            }
            Page::Restaurant { id } => {
                let name = self
                    .restaurants
                    .iter()
                    .find(|r| r.id == id)
                    .map_or(self.details.name.as_str(), |r| r.name.as_str());
                let details = &self.details;
                info!(
                    "Showing menu for {}: {} ({} reviews), {}, open {}, {}",
                    name, details.rating, details.reviews, details.address, details.hours, details.phone
                );
                for section in &self.menu {
                    info!("  {} ({} items)", section.title, section.items.len());
                }
            }
            Page::Checkout => {
                let summary = self.summary();
                info!(
                    "Checkout: {} items, {}",
                    self.cart.lines().len(),
                    summary.place_order_label()
                );
            }
            Page::Tracking => {
                let mut view = TrackingView::new(&self.config);
                view.journey.start();
                view.stages.start();
                view.eta.start();
                info!(
                    "Tracking rider from {} to {} ({:.1} away)",
                    view.journey.start_point(),
                    view.journey.end_point(),
                    view.journey.start_point().distance(&view.journey.end_point())
                );
                self.tracking = Some(view);

                let tracking = &self.config.tracking;
                let schedules = [
                    (TimerKind::RiderTick, tracking.tick_interval()),
                    (TimerKind::StageTick, tracking.stage_interval()),
                    (TimerKind::EtaTick, tracking.eta_interval()),
                ];
                for (kind, interval) in schedules {
                    self.timers.arm(kind, Schedule::Every(interval))?;
                }
            }
            Page::Home => {
                info!("Popular categories: {}", catalog::HOME_CATEGORIES.join(", "));
            }
        }
        Ok(())
    }

    pub fn visible_restaurants(&self) -> Vec<&Restaurant> {
        self.filter.apply(&self.restaurants)
    }

    fn open_item(&mut self, item_id: u32) {
        if !matches!(self.page, Page::Restaurant { .. }) {
            warn!("Menu items can only be opened from a restaurant page");
            return;
        }
        let Some(item) = catalog::find_item(&self.menu, item_id).cloned() else {
            warn!("Unknown menu item {}", item_id);
            return;
        };

        if item.has_customizations() {
            self.dialog = Some(ItemDialog::open(item));
        } else {
            let line = quick_add(&item);
            self.notify_added(line.quantity, &line.name);
            self.cart.add(line);
        }
    }

    fn add_to_cart(&mut self) {
        let Some(mut dialog) = self.dialog.take() else {
            return;
        };
        let total = dialog.total();
        let line = dialog.add_to_cart();
        info!("Added {} for {}", line.name, format_price(total));
        self.notify_added(line.quantity, &line.name);
        self.cart.add(line);
    }

    fn notify_added(&mut self, quantity: u32, name: &str) {
        self.notify(
            "Item Added to Cart!",
            format!("{}x {} has been successfully added.", quantity, name),
        );
    }

    pub fn summary(&self) -> OrderSummary {
        OrderSummary::new(&self.cart, self.config.checkout.delivery_fee, self.tip_percent)
    }

    pub fn place_order(&mut self, form: &CheckoutForm) -> Result<(), CheckoutError> {
        if self.placing.is_some() {
            return Err(CheckoutError::AlreadyPlacing);
        }
        form.validate()?;

        let delay = self.config.checkout.submit_delay();
        if let Err(e) = self.timers.arm(TimerKind::SubmitOrder, Schedule::Once(delay)) {
            warn!("{}", e);
            self.notify("Something went wrong.", String::new());
            return Ok(());
        }
        self.placing = Some(self.summary());
        self.notify("Placing your order...", String::new());
        Ok(())
    }

    /// Runs one timer tick. A tick for a view that is gone changes nothing.
    pub fn on_timer(&mut self, kind: TimerKind) -> TimerControl {
        match kind {
            TimerKind::SubmitOrder => {
                let Some(summary) = self.placing.take() else {
                    return TimerControl::Stop;
                };
                let order = Order::new(summary);
                info!(
                    "Order #{} placed at {}: {}",
                    order.number,
                    order.placed_at_label(),
                    format_price(order.summary.total)
                );
                self.order = Some(order);
                self.cart.clear();
                self.notify("Your order has been placed!", String::new());
                // The submit timer already removes itself.
                self.timers.forget(TimerKind::SubmitOrder);
                if let Err(e) = self.navigate(Page::Tracking) {
                    warn!("Could not start tracking: {}", e);
                }
                TimerControl::Stop
            }
            _ => {
                let Some(view) = &mut self.tracking else {
                    return TimerControl::Stop;
                };
                let Some(feature) = view.feature_mut(kind) else {
                    return TimerControl::Stop;
                };
                let control = feature.tick();
                if control == TimerControl::Stop {
                    info!("{} finished", feature.name());
                }
                control
            }
        }
    }

    pub fn tracking_finished(&self) -> bool {
        self.tracking.as_ref().is_some_and(TrackingView::is_complete)
    }

    fn notify(&mut self, title: &str, description: String) {
        info!("{} {}", title, description);
        self.notifications.push(Notification {
            title: title.to_string(),
            description,
        });
    }
}
