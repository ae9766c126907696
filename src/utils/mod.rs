//! Various unsorted geometrical and logical operators.

pub use self::morton::{MortonAnchor, MortonCodec};

pub mod morton;
