pub mod check;
pub mod config;
pub mod fix;
pub mod normalize;
pub mod relocate;

pub use check::CheckOptions;
pub use normalize::NormalizeOptions;
