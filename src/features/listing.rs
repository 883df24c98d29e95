use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    pub id: u32,
    pub name: String,
    pub cuisine_types: Vec<String>,
    pub rating: f64,
    /// Minutes.
    pub delivery_time: u32,
    pub image_url: String,
}

impl Restaurant {
    fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self
                .cuisine_types
                .iter()
                .any(|c| c.to_lowercase().contains(&query))
    }

    /// Card summary: up to three cuisine badges, rating and delivery time.
    pub fn card_line(&self) -> String {
        let badges: Vec<&str> = self.cuisine_types.iter().take(3).map(String::as_str).collect();
        format!(
            "{} [{}] {:.1} stars, {} min",
            self.name,
            badges.join(", "),
            self.rating,
            self.delivery_time
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    #[default]
    Rating,
    DeliveryTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingFilter {
    pub query: Option<String>,
    pub cuisines: BTreeSet<String>,
    pub min_rating: Option<u8>,
    pub max_delivery_time: u32,
    pub sort: SortBy,
}

impl ListingFilter {
    pub const MIN_DELIVERY_TIME: u32 = 5;
    pub const MAX_DELIVERY_TIME: u32 = 60;
    pub const DELIVERY_TIME_STEP: u32 = 5;

    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        let query = query.trim();
        Self {
            query: (!query.is_empty()).then(|| query.to_string()),
            ..Self::default()
        }
    }

    /// Moves the delivery-time slider, snapping to its 5-minute steps.
    pub fn set_max_delivery_time(&mut self, minutes: u32) {
        let clamped = minutes.clamp(Self::MIN_DELIVERY_TIME, Self::MAX_DELIVERY_TIME);
        self.max_delivery_time = clamped - clamped % Self::DELIVERY_TIME_STEP;
    }

    pub fn toggle_cuisine(&mut self, cuisine: &str) {
        if !self.cuisines.remove(cuisine) {
            self.cuisines.insert(cuisine.to_string());
        }
    }

    fn accepts(&self, restaurant: &Restaurant) -> bool {
        if let Some(query) = &self.query {
            if !restaurant.matches_query(query) {
                return false;
            }
        }
        if !self.cuisines.is_empty()
            && !restaurant
                .cuisine_types
                .iter()
                .any(|c| self.cuisines.contains(c))
        {
            return false;
        }
        if let Some(min) = self.min_rating {
            if restaurant.rating < f64::from(min) {
                return false;
            }
        }
        restaurant.delivery_time <= self.max_delivery_time
    }

    pub fn apply<'a>(&self, restaurants: &'a [Restaurant]) -> Vec<&'a Restaurant> {
        let mut matching: Vec<&Restaurant> =
            restaurants.iter().filter(|r| self.accepts(r)).collect();
        match self.sort {
            SortBy::Rating => matching.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::DeliveryTime => matching.sort_by_key(|r| r.delivery_time),
        }
        matching
    }
}

impl Default for ListingFilter {
    fn default() -> Self {
        Self {
            query: None,
            cuisines: BTreeSet::new(),
            min_rating: None,
            max_delivery_time: 45,
            sort: SortBy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn names(restaurants: &[&Restaurant]) -> Vec<String> {
        restaurants.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn default_filter_sorts_by_rating_within_45_minutes() {
        let all = catalog::restaurants();
        let shown = ListingFilter::default().apply(&all);
        assert_eq!(shown.len(), 8);
        assert_eq!(shown[0].name, "Green Leaf Salad Bar");
        assert_eq!(shown[7].name, "Burger Joint");
    }

    #[test]
    fn query_matches_name_or_cuisine() {
        let all = catalog::restaurants();
        let shown = ListingFilter::with_query("  asian ").apply(&all);
        assert_eq!(names(&shown), ["Sushi Palace", "Noodle House"]);

        let shown = ListingFilter::with_query("PIZZA").apply(&all);
        assert_eq!(names(&shown), ["Pizza Heaven"]);
    }

    #[test]
    fn blank_query_is_no_query() {
        assert_eq!(ListingFilter::with_query("   ").query, None);
    }

    #[test]
    fn cuisine_rating_and_delivery_filters_combine() {
        let all = catalog::restaurants();
        let mut filter = ListingFilter::default();
        filter.toggle_cuisine("Italian");
        assert_eq!(names(&filter.apply(&all)), ["Mama's Pasta", "Pizza Heaven"]);

        filter.set_max_delivery_time(33);
        assert_eq!(filter.max_delivery_time, 30);
        assert_eq!(names(&filter.apply(&all)), ["Pizza Heaven"]);

        filter.toggle_cuisine("Italian");
        filter.min_rating = Some(4);
        filter.sort = SortBy::DeliveryTime;
        assert_eq!(
            names(&filter.apply(&all)),
            ["Green Leaf Salad Bar", "Burger Joint", "Taco Town", "Sushi Palace", "Pizza Heaven"]
        );
    }

    #[test]
    fn slider_is_bounded() {
        let mut filter = ListingFilter::default();
        filter.set_max_delivery_time(0);
        assert_eq!(filter.max_delivery_time, 5);
        filter.set_max_delivery_time(90);
        assert_eq!(filter.max_delivery_time, 60);
    }

    #[test]
    fn card_line_shows_three_badges() {
        let all = catalog::restaurants();
        assert_eq!(all[2].card_line(), "Burger Joint [Burgers, American, Fast Food] 4.2 stars, 20 min");
    }
}
