pub mod bookings;
pub mod gym_owners;
pub mod messages;
pub mod plans;
pub mod subscriptions;
pub mod trainer_availability;
pub mod trainers;
pub mod users;
