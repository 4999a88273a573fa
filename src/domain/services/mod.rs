pub mod booking_service;
pub mod event_service;
pub mod normalize;
