pub mod entity;

pub use entity::{ListingStatus, ResaleListing};
