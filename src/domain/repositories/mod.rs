pub mod availability;
pub mod bookings;
pub mod gym_owners;
pub mod messages;
pub mod subscriptions;
pub mod trainers;
pub mod users;
