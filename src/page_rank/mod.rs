pub mod incoming;
pub mod iterated;
pub mod sampled;
pub mod transition;
mod traits;
pub use self::incoming::IncomingIndex;
pub use self::iterated::{DanglingPolicy, IteratedPageRank};
pub use self::sampled::SampledPageRank;
pub use self::traits::*;
pub use self::transition::TransitionModel;
