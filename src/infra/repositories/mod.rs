pub mod mongo_booking_repo;
pub mod mongo_event_repo;
