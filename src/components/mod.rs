//! The components module contains all shared components for our app.

mod add_to_playlist;
mod app;
mod create_playlist;
mod icons;
mod modal;
mod toast;
pub mod views;

pub use add_to_playlist::*;
pub use app::*;
pub use create_playlist::*;
pub use icons::*;
pub use modal::*;
pub use toast::*;
// Views are accessed via views::ViewName
