pub mod ids;
pub mod slug;

pub use ids::*;
pub use slug::*;
