pub mod accounting;
pub mod auth;
pub mod calendar;
pub mod declaration;
pub mod dispatch;
pub mod invoice;
pub mod relay;
pub mod rut;
pub mod shared;
pub mod third_party;
