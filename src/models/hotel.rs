use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    pub location: String,
    /// Base nightly rate before any room multiplier.
    pub price: f64,
    pub rating: f32,
    pub description: String,
    pub tags: Vec<String>,
    pub amenities: Vec<String>,
    pub rooms: Vec<String>,
}

impl Hotel {
    pub fn offers_room(&self, room_type: &str) -> bool {
        self.rooms.iter().any(|room| room == room_type)
    }
}

/// Read-only hotel listing shared by the booking flow and the hotel pages.
#[derive(Debug, Clone)]
pub struct HotelCatalog {
    hotels: Vec<Hotel>,
}

impl HotelCatalog {
    pub fn new(hotels: Vec<Hotel>) -> Self {
        Self { hotels }
    }

    pub fn all(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn find(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|hotel| hotel.id == id)
    }
}

impl Default for HotelCatalog {
    fn default() -> Self {
        Self::new(featured_hotels())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

pub fn featured_hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: "1".to_string(),
            name: "Oceanview Resort".to_string(),
            location: "Miami, Florida".to_string(),
            price: 299.0,
            rating: 4.8,
            description: "A luxurious beachfront resort with stunning ocean views, multiple pools, and world-class dining options.".to_string(),
            tags: strings(&["Featured", "Beach", "Pool", "Spa"]),
            amenities: strings(&["Free WiFi", "Restaurant", "Swimming Pool", "Spa", "Fitness Center", "Room Service", "Beachfront"]),
            rooms: strings(&["Deluxe Ocean View", "Standard Room", "Family Suite", "Presidential Suite"]),
        },
        Hotel {
            id: "2".to_string(),
            name: "Mountain Retreat Lodge".to_string(),
            location: "Aspen, Colorado".to_string(),
            price: 249.0,
            rating: 4.7,
            description: "Cozy mountain lodge surrounded by nature. Perfect for skiing in winter and hiking in summer.".to_string(),
            tags: strings(&["Featured", "Mountain", "Ski-in/out", "Fireplace"]),
            amenities: strings(&["Free WiFi", "Restaurant", "Bar", "Ski Storage", "Fireplace", "Hiking Trails", "Mountain Views"]),
            rooms: strings(&["Mountain View Room", "Deluxe Suite", "Family Cabin", "Chalet"]),
        },
        Hotel {
            id: "3".to_string(),
            name: "Urban Boutique Hotel".to_string(),
            location: "New York City, NY".to_string(),
            price: 329.0,
            rating: 4.6,
            description: "Stylish boutique hotel in the heart of Manhattan, with easy access to major attractions.".to_string(),
            tags: strings(&["City", "Shopping", "Nightlife"]),
            amenities: strings(&["Free WiFi", "Restaurant", "Bar", "Concierge", "Business Center", "Fitness Room", "Valet Parking"]),
            rooms: strings(&["City View Room", "Executive Suite", "Penthouse Suite", "Standard Queen"]),
        },
        Hotel {
            id: "4".to_string(),
            name: "Sunset Villa Resort".to_string(),
            location: "Santorini, Greece".to_string(),
            price: 399.0,
            rating: 4.9,
            description: "Breathtaking clifftop villas with private pools overlooking the Aegean Sea and famous Santorini sunsets.".to_string(),
            tags: strings(&["Featured", "Sea View", "Private Pool", "Luxury"]),
            amenities: strings(&["Free WiFi", "Private Pool", "Breakfast Service", "Concierge", "Airport Transfer", "Sunset Views", "Spa Services"]),
            rooms: strings(&["Cliffside Villa", "Honeymoon Suite", "Luxury Villa with Pool", "Premium Sea View Suite"]),
        },
        Hotel {
            id: "5".to_string(),
            name: "Historic Downtown Inn".to_string(),
            location: "Charleston, South Carolina".to_string(),
            price: 199.0,
            rating: 4.5,
            description: "Charming inn located in a beautifully restored historic building in the heart of Charleston's historic district.".to_string(),
            tags: strings(&["Historic", "Central", "Breakfast"]),
            amenities: strings(&["Free WiFi", "Complimentary Breakfast", "Garden Courtyard", "Afternoon Tea", "Concierge", "Historic Tours", "Evening Wine Reception"]),
            rooms: strings(&["Queen Room", "King Suite", "Carriage House Room", "Garden Suite"]),
        },
        Hotel {
            id: "6".to_string(),
            name: "Desert Oasis Resort".to_string(),
            location: "Scottsdale, Arizona".to_string(),
            price: 279.0,
            rating: 4.7,
            description: "Luxurious desert resort featuring pools, golf courses, and spa treatments inspired by Native American traditions.".to_string(),
            tags: strings(&["Desert", "Golf", "Spa"]),
            amenities: strings(&["Free WiFi", "Golf Course", "Multiple Pools", "Spa", "Desert Views", "Tennis Courts", "Fine Dining"]),
            rooms: strings(&["Desert View Room", "Casita Suite", "Pool Villa", "Luxury Suite"]),
        },
    ]
}
