//! Customer name and menu tables

use crate::components::Name;
use rand::Rng;

/// Generate a random customer name
pub fn generate_name(rng: &mut impl Rng) -> Name {
    Name::new(CUSTOMER_NAMES[rng.gen_range(0..CUSTOMER_NAMES.len())])
}

/// Pick a random item off the menu
pub fn random_menu_item(rng: &mut impl Rng) -> &'static str {
    MENU_ITEMS[rng.gen_range(0..MENU_ITEMS.len())]
}

/// What the canteen sells - the order a customer calls out at the counter
pub static MENU_ITEMS: &[&str] = &["Burger", "Fries", "Soda", "Coffee", "Nuggets", "Wrap"];

// Regulars - would be loaded from data files in production
static CUSTOMER_NAMES: &[&str] = &[
    "Keren",
    "Matcha",
    "Miki",
    "Rov",
    "Jea",
    "Paolo",
    "Bianca",
    "Dario",
    "Lena",
    "Carmen",
    "Noel",
    "Isko",
    "Thea",
    "Marco",
    "Ysabel",
    "Dane",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_name_draws_from_table() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let name = generate_name(&mut rng);
            assert!(CUSTOMER_NAMES.contains(&name.as_str()));
        }
    }

    #[test]
    fn test_menu_item_draws_from_menu() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            assert!(MENU_ITEMS.contains(&random_menu_item(&mut rng)));
        }
    }
}
