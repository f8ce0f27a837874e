pub mod listenbrainz;
pub mod models;

pub use listenbrainz::*;
pub use models::*;
