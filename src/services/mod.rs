pub mod booking_flow;
pub mod draft_registry;
pub mod pricing_service;
pub mod promotion_service;
pub mod room_pricing;
pub mod session;
