//! Hard-coded storefront content.

use crate::features::checkout::CartLine;
use crate::features::listing::Restaurant;
use crate::features::menu_item::{CustomizationChoice, CustomizationOption, MenuItem, SelectionMode};

#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantDetails {
    pub name: String,
    pub image_url: String,
    pub rating: f64,
    pub reviews: u32,
    pub cuisine: Vec<String>,
    pub address: String,
    pub hours: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub id: &'static str,
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| (*s).to_string()).collect()
}

fn restaurant(id: u32, name: &str, cuisines: &[&str], rating: f64, delivery_time: u32, photo: &str) -> Restaurant {
    Restaurant {
        id,
        name: name.to_string(),
        cuisine_types: strings(cuisines),
        rating,
        delivery_time,
        image_url: format!("https://images.unsplash.com/{photo}?q=80&w=800&auto=format&fit=crop"),
    }
}

pub fn restaurants() -> Vec<Restaurant> {
    vec![
        restaurant(1, "Sushi Palace", &["Sushi", "Japanese", "Asian"], 4.8, 25, "photo-1579871494447-9811cf80d66c"),
        restaurant(2, "Pizza Heaven", &["Pizza", "Italian"], 4.5, 30, "photo-1513104890138-7c749659a591"),
        restaurant(3, "Burger Joint", &["Burgers", "American", "Fast Food"], 4.2, 20, "photo-1568901346375-23c9450c58cd"),
        restaurant(4, "Taco Town", &["Tacos", "Mexican"], 4.7, 22, "photo-1565299624946-b28f40a0ae38"),
        restaurant(5, "Green Leaf Salad Bar", &["Salads", "Healthy"], 4.9, 15, "photo-1540189549336-e6e99c3679fe"),
        restaurant(6, "Noodle House", &["Noodles", "Vietnamese", "Asian"], 4.6, 35, "photo-1585032226651-759b368d7246"),
        restaurant(7, "Mama's Pasta", &["Italian", "Pasta"], 4.8, 40, "photo-1621996346565-e326e22e3924"),
        restaurant(8, "The Curry Pot", &["Indian", "Curry"], 4.4, 45, "photo-1589302168068-964664d93dc0"),
    ]
}

/// Quick-pick categories offered on the home page.
pub const HOME_CATEGORIES: [&str; 6] = ["Pizza", "Sushi", "Burgers", "Mexican", "Indian", "Chinese"];

pub fn restaurant_details() -> RestaurantDetails {
    RestaurantDetails {
        name: "Sushi Palace".to_string(),
        image_url: "https://images.unsplash.com/photo-1579584425555-c3ce17fd4351?q=80&w=1974&auto=format&fit=crop".to_string(),
        rating: 4.8,
        reviews: 250,
        cuisine: strings(&["Sushi", "Japanese"]),
        address: "123 Ocean Ave, Seaside, CA 90210".to_string(),
        hours: "11:00 AM - 10:00 PM".to_string(),
        phone: "555-123-4567".to_string(),
    }
}

fn item(id: u32, name: &str, description: &str, price: f64, photo: &str) -> MenuItem {
    MenuItem {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price,
        image_url: Some(format!("https://images.unsplash.com/{photo}?q=80&w=1974&auto=format&fit=crop")),
        customization_options: Vec::new(),
    }
}

fn choice(id: &str, name: &str, price_modifier: f64) -> CustomizationChoice {
    CustomizationChoice {
        id: id.to_string(),
        name: name.to_string(),
        price_modifier,
    }
}

fn spicy_tuna_options() -> Vec<CustomizationOption> {
    vec![
        CustomizationOption {
            id: "rice-option".to_string(),
            title: "Rice Choice".to_string(),
            mode: SelectionMode::Single,
            choices: vec![choice("white", "White Rice", 0.0), choice("brown", "Brown Rice", 1.0)],
        },
        CustomizationOption {
            id: "extras".to_string(),
            title: "Add Extras".to_string(),
            mode: SelectionMode::Multiple,
            choices: vec![
                choice("avocado", "Avocado", 1.5),
                choice("cream-cheese", "Cream Cheese", 1.0),
            ],
        },
    ]
}

pub fn menu() -> Vec<MenuSection> {
    let mut spicy_tuna = item(
        3,
        "Spicy Tuna Roll",
        "Tuna, cucumber, spicy mayo, and sesame seeds.",
        9.0,
        "photo-1592313636932-35359424c522",
    );
    spicy_tuna.customization_options = spicy_tuna_options();

    vec![
        MenuSection {
            id: "appetizers",
            title: "Appetizers",
            items: vec![
                item(1, "Edamame", "Steamed young soybeans with sea salt.", 5.0, "photo-1594912239386-2a781015694a"),
                item(2, "Gyoza", "Pan-fried pork and vegetable dumplings.", 7.5, "photo-1626382492429-37965a3151b7"),
            ],
        },
        MenuSection {
            id: "sushi-rolls",
            title: "Sushi Rolls",
            items: vec![
                spicy_tuna,
                item(4, "California Roll", "Crab, avocado, cucumber, and masago.", 8.5, "photo-1615361200141-f45040f367be"),
                item(5, "Dragon Roll", "Eel and cucumber topped with avocado and eel sauce.", 14.0, "photo-1617196034183-421b4917c92d"),
            ],
        },
        MenuSection {
            id: "sashimi",
            title: "Sashimi",
            items: vec![
                item(6, "Tuna Sashimi (5 pcs)", "Fresh, high-quality slices of raw tuna.", 15.0, "photo-1611069234850-29c21a44c02f"),
                item(7, "Salmon Sashimi (5 pcs)", "Rich and buttery slices of raw salmon.", 14.0, "photo-1553641243-c7a86894429d"),
            ],
        },
    ]
}

pub fn find_item(menu: &[MenuSection], item_id: u32) -> Option<&MenuItem> {
    menu.iter()
        .flat_map(|section| section.items.iter())
        .find(|item| item.id == item_id)
}

/// What the cart holds before anything is added.
pub fn placeholder_cart() -> Vec<CartLine> {
    let line = |item_id, name: &str, unit_price, quantity| CartLine {
        item_id,
        name: name.to_string(),
        unit_price,
        quantity,
    };
    vec![
        line(1, "Spicy Tuna Roll", 12.99, 2),
        line(2, "Miso Soup", 3.50, 1),
        line(3, "Edamame", 5.00, 1),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_has_one_customizable_item() {
        let customizable: Vec<_> = menu()
            .into_iter()
            .flat_map(|s| s.items)
            .filter(MenuItem::has_customizations)
            .map(|i| i.name)
            .collect();
        assert_eq!(customizable, ["Spicy Tuna Roll"]);
    }

    #[test]
    fn find_item_by_id() {
        let menu = menu();
        assert_eq!(find_item(&menu, 6).map(|i| i.price), Some(15.0));
        assert!(find_item(&menu, 42).is_none());
    }

    #[test]
    fn restaurant_ids_are_unique() {
        let mut ids: Vec<_> = restaurants().iter().map(|r| r.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }
}
