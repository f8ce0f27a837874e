mod listens;

pub use listens::*;
