pub mod availability;
pub mod bookings;
pub mod chat;
pub mod identity;
pub mod subscriptions;
pub mod trainers;
