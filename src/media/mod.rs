//! All records the api returns, like anime, episodes or recommendations.

mod anime;
mod chronicle;
mod episode;
mod episode_list;
mod recommendation;
mod relation;
mod shared;

pub use anime::*;
pub use chronicle::*;
pub use episode::*;
pub use episode_list::*;
pub use recommendation::*;
pub use relation::*;
pub use shared::*;
