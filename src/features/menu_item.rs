use super::checkout::CartLine;
use log::{debug, info};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq)]
pub struct CustomizationChoice {
    pub id: String,
    pub name: String,
    pub price_modifier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Multiple,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomizationOption {
    pub id: String,
    pub title: String,
    pub mode: SelectionMode,
    pub choices: Vec<CustomizationChoice>,
}

impl CustomizationOption {
    pub fn choice(&self, choice_id: &str) -> Option<&CustomizationChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub customization_options: Vec<CustomizationOption>,
}

impl MenuItem {
    pub fn has_customizations(&self) -> bool {
        !self.customization_options.is_empty()
    }
}

/// The chosen choices of one option. The variant fixes how a toggle behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Single(Option<String>),
    Multiple(BTreeSet<String>),
}

impl Selection {
    pub fn empty(mode: SelectionMode) -> Self {
        match mode {
            SelectionMode::Single => Selection::Single(None),
            SelectionMode::Multiple => Selection::Multiple(BTreeSet::new()),
        }
    }

    pub fn toggle(&mut self, choice_id: &str) {
        match self {
            Selection::Single(chosen) => *chosen = Some(choice_id.to_string()),
            Selection::Multiple(chosen) => {
                if !chosen.remove(choice_id) {
                    chosen.insert(choice_id.to_string());
                }
            }
        }
    }

    pub fn chosen(&self) -> Box<dyn Iterator<Item = &str> + '_> {
        match self {
            Selection::Single(chosen) => Box::new(chosen.iter().map(String::as_str)),
            Selection::Multiple(chosen) => Box::new(chosen.iter().map(String::as_str)),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        match self {
            Selection::Single(chosen) => usize::from(chosen.is_some()),
            Selection::Multiple(chosen) => chosen.len(),
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Per-option selections of one customization session. Options that were
/// never touched are simply absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    by_option: HashMap<String, Selection>,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, option: &CustomizationOption, choice_id: &str) {
        self.by_option
            .entry(option.id.clone())
            .or_insert_with(|| Selection::empty(option.mode))
            .toggle(choice_id);
    }

    pub fn get(&self, option_id: &str) -> Option<&Selection> {
        self.by_option.get(option_id)
    }

    /// Chosen ids for an option; empty when the option has no entry.
    #[cfg(test)]
    pub fn chosen(&self, option_id: &str) -> Vec<&str> {
        self.by_option
            .get(option_id)
            .map(|selection| selection.chosen().collect())
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.by_option.clear();
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.by_option.values().all(Selection::is_empty)
    }
}

/// Item quantity in a customization session, never below 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    #[cfg(test)]
    pub fn new(value: u32) -> Self {
        Quantity(value.max(1))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.0 = self.0.saturating_sub(1).max(1);
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

/// `(base_price + sum of selected modifiers) * quantity`.
///
/// Selected ids that no longer match a choice of their option add nothing.
pub fn compute_total(
    base_price: f64,
    quantity: Quantity,
    options: &[CustomizationOption],
    selections: &Selections,
) -> f64 {
    unit_price(base_price, options, selections) * f64::from(quantity.get())
}

pub fn unit_price(base_price: f64, options: &[CustomizationOption], selections: &Selections) -> f64 {
    let mut price = base_price;
    for option in options {
        let Some(selection) = selections.get(&option.id) else {
            continue;
        };
        for choice_id in selection.chosen() {
            match option.choice(choice_id) {
                Some(choice) => price += choice.price_modifier,
                None => debug!("Ignoring unknown choice {} for option {}", choice_id, option.id),
            }
        }
    }
    price
}

pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// The "+$X.XX" hint shown next to a choice; blank for free choices.
pub fn modifier_label(choice: &CustomizationChoice) -> String {
    if choice.price_modifier > 0.0 {
        format!("+{}", format_price(choice.price_modifier))
    } else {
        String::new()
    }
}

/// One open customization dialog for a menu item.
#[derive(Debug, Clone)]
pub struct ItemDialog {
    item: MenuItem,
    quantity: Quantity,
    selections: Selections,
}

impl ItemDialog {
    pub fn open(item: MenuItem) -> Self {
        info!("Customizing {}: {}", item.name, item.description);
        for option in &item.customization_options {
            for choice in &option.choices {
                debug!("  {} / {} {}", option.title, choice.name, modifier_label(choice));
            }
        }
        Self {
            item,
            quantity: Quantity::ONE,
            selections: Selections::new(),
        }
    }

    #[cfg(test)]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[cfg(test)]
    pub fn selections(&self) -> &Selections {
        &self.selections
    }

    /// Returns false when the option or choice does not belong to this item.
    pub fn toggle(&mut self, option_id: &str, choice_id: &str) -> bool {
        let Some(option) = self
            .item
            .customization_options
            .iter()
            .find(|o| o.id == option_id)
        else {
            return false;
        };
        if option.choice(choice_id).is_none() {
            return false;
        }
        self.selections.toggle(option, choice_id);
        true
    }

    pub fn increment(&mut self) {
        self.quantity.increment();
    }

    pub fn decrement(&mut self) {
        self.quantity.decrement();
    }

    pub fn total(&self) -> f64 {
        compute_total(
            self.item.price,
            self.quantity,
            &self.item.customization_options,
            &self.selections,
        )
    }

    pub fn add_label(&self) -> String {
        format!("Add to Cart - {}", format_price(self.total()))
    }

    /// Builds the cart line and resets the dialog for the next use.
    pub fn add_to_cart(&mut self) -> CartLine {
        let line = CartLine {
            item_id: self.item.id,
            name: self.item.name.clone(),
            unit_price: unit_price(
                self.item.price,
                &self.item.customization_options,
                &self.selections,
            ),
            quantity: self.quantity.get(),
        };
        self.reset();
        line
    }

    pub fn dismiss(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.quantity = Quantity::ONE;
        self.selections.clear();
    }
}

/// Cart line for an item added without opening the dialog.
pub fn quick_add(item: &MenuItem) -> CartLine {
    CartLine {
        item_id: item.id,
        name: item.name.clone(),
        unit_price: item.price,
        quantity: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use proptest::sample::select;

    fn choice(id: &str, price_modifier: f64) -> CustomizationChoice {
        CustomizationChoice {
            id: id.to_string(),
            name: id.to_string(),
            price_modifier,
        }
    }

    fn rice() -> CustomizationOption {
        CustomizationOption {
            id: "rice".to_string(),
            title: "Rice Choice".to_string(),
            mode: SelectionMode::Single,
            choices: vec![choice("white", 0.0), choice("brown", 1.0)],
        }
    }

    fn extras() -> CustomizationOption {
        CustomizationOption {
            id: "extras".to_string(),
            title: "Add Extras".to_string(),
            mode: SelectionMode::Multiple,
            choices: vec![choice("avocado", 1.5), choice("cream-cheese", 1.0)],
        }
    }

    fn roll() -> MenuItem {
        MenuItem {
            id: 3,
            name: "Spicy Tuna Roll".to_string(),
            description: "Tuna, cucumber, spicy mayo, and sesame seeds.".to_string(),
            price: 9.0,
            image_url: None,
            customization_options: vec![rice(), extras()],
        }
    }

    #[test]
    fn base_price_without_options() {
        assert_eq!(compute_total(10.0, Quantity::ONE, &[], &Selections::new()), 10.0);
    }

    #[test]
    fn single_choice_delta_times_quantity() {
        let options = [rice()];
        let mut selections = Selections::new();
        selections.toggle(&options[0], "brown");
        assert_eq!(compute_total(10.0, Quantity::new(2), &options, &selections), 22.0);
    }

    #[test]
    fn single_mode_replaces() {
        let option = rice();
        let mut selections = Selections::new();
        selections.toggle(&option, "white");
        selections.toggle(&option, "brown");
        assert_eq!(selections.chosen("rice"), vec!["brown"]);
        assert_eq!(selections.get("rice").map(Selection::len), Some(1));
    }

    #[test]
    fn multiple_mode_toggles_independently() {
        let (rice, extras) = (rice(), extras());
        let mut selections = Selections::new();
        selections.toggle(&rice, "white");
        selections.toggle(&extras, "avocado");
        selections.toggle(&extras, "cream-cheese");
        selections.toggle(&extras, "avocado");
        assert_eq!(selections.chosen("extras"), vec!["cream-cheese"]);
        assert_eq!(selections.chosen("rice"), vec!["white"]);
    }

    #[test]
    fn unknown_choice_adds_nothing() {
        let options = [extras()];
        let mut selections = Selections::new();
        selections.toggle(&options[0], "avocado");
        selections.toggle(&options[0], "wasabi");
        assert_eq!(compute_total(9.0, Quantity::ONE, &options, &selections), 10.5);
    }

    #[test]
    fn absent_option_is_empty() {
        let selections = Selections::new();
        assert!(selections.chosen("rice").is_empty());
        assert!(selections.is_empty());
    }

    #[test]
    fn quantity_floors_at_one() {
        let mut quantity = Quantity::ONE;
        quantity.decrement();
        assert_eq!(quantity.get(), 1);
        quantity.increment();
        quantity.increment();
        quantity.decrement();
        assert_eq!(quantity.get(), 2);
        assert_eq!(Quantity::new(0), Quantity::ONE);
    }

    #[test]
    fn dialog_total_tracks_changes() {
        let mut dialog = ItemDialog::open(roll());
        assert_eq!(dialog.total(), 9.0);

        assert!(dialog.toggle("rice", "brown"));
        assert!(dialog.toggle("extras", "avocado"));
        assert_eq!(dialog.total(), 11.5);

        dialog.increment();
        assert_eq!(dialog.total(), 23.0);
        assert_eq!(dialog.add_label(), "Add to Cart - $23.00");

        assert!(!dialog.toggle("sauce", "eel"));
        assert!(!dialog.toggle("rice", "sticky"));
        assert_eq!(dialog.total(), 23.0);
    }

    #[test]
    fn add_to_cart_resets_session() {
        let mut dialog = ItemDialog::open(roll());
        dialog.toggle("extras", "cream-cheese");
        dialog.increment();

        let line = dialog.add_to_cart();
        assert_eq!(line.name, "Spicy Tuna Roll");
        assert_eq!(line.unit_price, 10.0);
        assert_eq!(line.quantity, 2);

        assert_eq!(dialog.quantity(), Quantity::ONE);
        assert!(dialog.selections().is_empty());
        assert_eq!(dialog.total(), 9.0);
    }

    #[test]
    fn dismiss_resets_session() {
        let mut dialog = ItemDialog::open(roll());
        dialog.toggle("rice", "brown");
        dialog.increment();
        dialog.dismiss();
        assert_eq!(dialog.quantity(), Quantity::ONE);
        assert!(dialog.selections().is_empty());
    }

    #[test]
    fn labels() {
        assert_eq!(format_price(22.0), "$22.00");
        assert_eq!(format_price(3.5), "$3.50");
        assert_eq!(modifier_label(&choice("brown", 1.0)), "+$1.00");
        assert_eq!(modifier_label(&choice("white", 0.0)), "");
    }

    proptest! {
        #[test]
        fn double_toggle_restores_multiple_selection(
            preset in proptest::collection::vec(select(vec!["avocado", "cream-cheese"]), 0..3),
            target in select(vec!["avocado", "cream-cheese"]),
        ) {
            let option = extras();
            let mut selections = Selections::new();
            for id in &preset {
                selections.toggle(&option, id);
            }
            let before: Vec<String> =
                selections.chosen("extras").into_iter().map(String::from).collect();
            selections.toggle(&option, target);
            selections.toggle(&option, target);
            prop_assert_eq!(selections.chosen("extras"), before);
        }

        #[test]
        fn single_mode_never_holds_more_than_one(
            picks in proptest::collection::vec(select(vec!["white", "brown"]), 1..8),
        ) {
            let option = rice();
            let mut selections = Selections::new();
            for id in &picks {
                selections.toggle(&option, id);
            }
            prop_assert_eq!(selections.chosen("rice"), vec![picks[picks.len() - 1]]);
        }
    }
}
