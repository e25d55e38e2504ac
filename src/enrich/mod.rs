pub mod pipeline;
pub mod places;

pub use pipeline::enrich_records;
pub use places::PlacesClient;
