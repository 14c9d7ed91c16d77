/// Price multipliers relative to a hotel's base nightly rate.
const ROOM_PRICE_MULTIPLIERS: &[(&str, f64)] = &[
    ("Standard Room", 1.0),
    ("Standard Queen", 1.0),
    ("City View Room", 1.2),
    ("Mountain View Room", 1.2),
    ("Deluxe Ocean View", 1.5),
    ("Deluxe Suite", 1.8),
    ("Executive Suite", 2.0),
    ("Family Suite", 2.2),
    ("Family Cabin", 2.2),
    ("Penthouse Suite", 3.0),
    ("Presidential Suite", 4.0),
    ("Cliffside Villa", 2.5),
    ("Honeymoon Suite", 2.8),
    ("Luxury Villa with Pool", 3.5),
    ("Premium Sea View Suite", 3.0),
    ("Queen Room", 1.0),
    ("King Suite", 1.8),
    ("Carriage House Room", 1.5),
    ("Garden Suite", 1.7),
    ("Desert View Room", 1.2),
    ("Casita Suite", 1.7),
    ("Pool Villa", 2.5),
    ("Luxury Suite", 2.2),
    ("Chalet", 2.5),
];

pub struct RoomPricingCatalog;

impl RoomPricingCatalog {
    /// Multiplier for a room label; unknown or empty labels price at the base rate.
    pub fn price_multiplier(room_type: &str) -> f64 {
        ROOM_PRICE_MULTIPLIERS
            .iter()
            .find(|(label, _)| *label == room_type)
            .map(|(_, multiplier)| *multiplier)
            .unwrap_or(1.0)
    }

    pub fn room_price(base_price: f64, room_type: &str) -> f64 {
        base_price * Self::price_multiplier(room_type)
    }

    pub fn known_room_types() -> impl Iterator<Item = &'static str> {
        ROOM_PRICE_MULTIPLIERS.iter().map(|(label, _)| *label)
    }
}
