pub mod consts;
pub mod errors;
pub mod bitset;
pub mod hash;
pub mod geometry;
pub mod element;
pub mod filter;

pub use bitset::PagedBitSet;
pub use element::ByteEncoded;
pub use errors::{BloomError, Result};
pub use filter::BloomFilter;
pub use geometry::Geometry;
pub use hash::{derive_indices, DefaultDigest};
