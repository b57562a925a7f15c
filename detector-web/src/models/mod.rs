//! Request-scoped data types for a single analysis cycle

pub mod upload;
pub mod verdict;

pub use upload::UploadedImage;
pub use verdict::{Banner, Tier, Verdict};
