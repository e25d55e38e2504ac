pub mod business;
pub mod links;

pub use business::{BobParser, Parser};
pub use links::{extract_links, LinkPattern};
