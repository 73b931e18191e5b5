pub mod booking_statuses;
pub mod roles;
pub mod subscription_statuses;
