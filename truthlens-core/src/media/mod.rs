pub mod checker;
pub mod detector;
pub mod normalize;

pub use checker::MediaChecker;
pub use detector::{Detector, MediaDetector};
pub use normalize::ResponseShape;
