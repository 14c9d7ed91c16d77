pub mod booking;
pub mod hotel;
pub mod promotion;
pub mod reservation;
pub mod user;
