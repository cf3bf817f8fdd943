pub mod base;
pub mod grid;
pub mod transforms;

pub use base::{Activity, Itinerary, ItineraryPatch, ItinerarySubmission, NewActivity, NewStop, Stop};
pub use grid::{day_label, ItineraryGrid};
