//! Data models for the compose pipeline
//!
//! Every value here is produced once per request and consumed by the next
//! pipeline step or by serialization; nothing is shared across requests.

pub mod location;
pub mod place;
pub mod weather;

pub use location::{Coordinate, PlaceName};
pub use place::{LocalizedResponse, PlaceListing, RawListing};
pub use weather::WeatherSnapshot;
