//! Fragment Codec (split) and Fragment Collector (reassemble), spec.md §4.3/§4.4.

mod codec;
mod collector;

pub use codec::{split, FragmentInfo};
pub use collector::Collector;
