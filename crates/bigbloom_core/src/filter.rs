//! Approximate-membership filter over paged bit storage.

use crate::bitset::PagedBitSet;
use crate::element::ByteEncoded;
use crate::errors::{BloomError, Result};
use crate::geometry::Geometry;
use crate::hash::{derive_indices, reduce, DefaultDigest};
use digest::Digest;
use std::marker::PhantomData;
use tracing::debug;

/// Bloom filter answering "possibly present" / "definitely absent".
///
/// Storage is a [`PagedBitSet`], so a filter sized for billions of items
/// still addresses its bits through one contiguous u64 index space. The
/// digest family is a type parameter; the default 128-bit digest yields two
/// bit positions per salted invocation.
///
/// Reads (`contains*`, `get_bit`) take `&self` and may run from any number
/// of threads at once; mutation takes `&mut self`, so the bit storage itself
/// never needs internal locking.
pub struct BloomFilter<D: Digest = DefaultDigest> {
    geometry: Geometry,
    bits: PagedBitSet,
    inserted: u64,
    _digest: PhantomData<D>,
}

impl<D: Digest> BloomFilter<D> {
    /// Density-driven construction: `c` bits per element, `n` expected
    /// elements, `k` hash derivations. Total size is `ceil(c * n)`.
    pub fn with_bits_per_item(c: f64, n: u64, k: u32) -> Result<Self> {
        Ok(Self::from_geometry(Geometry::from_bits_per_item(c, n, k)?))
    }

    /// Size-driven construction: `m` total bits for `n` expected elements;
    /// the hash count is derived as `round((m/n) * ln 2)`.
    pub fn with_size(m: u64, n: u64) -> Result<Self> {
        Ok(Self::from_geometry(Geometry::from_size(m, n)?))
    }

    /// Accuracy-driven construction: geometry matching a target false
    /// positive probability `p` at `n` expected elements.
    pub fn with_fp_rate(p: f64, n: u64) -> Result<Self> {
        Ok(Self::from_geometry(Geometry::from_fp_rate(p, n)?))
    }

    fn from_geometry(geometry: Geometry) -> Self {
        debug!(
            m = geometry.size_bits,
            k = geometry.hashes,
            n = geometry.expected_items,
            "allocating bloom filter"
        );
        Self {
            bits: PagedBitSet::with_len(geometry.size_bits),
            geometry,
            inserted: 0,
            _digest: PhantomData,
        }
    }

    /// Rebuild a filter around previously captured state. Geometry is
    /// derived from `(m, n)` as in [`with_size`](Self::with_size); the
    /// supplied storage must hold exactly `m` bits and is adopted as-is,
    /// with `inserted` restoring the recorded insertion count.
    pub fn from_parts(m: u64, n: u64, inserted: u64, bits: PagedBitSet) -> Result<Self> {
        let geometry = Geometry::from_size(m, n)?;
        if bits.len() != m {
            return Err(BloomError::GeometryMismatch { expected: m, got: bits.len() });
        }
        debug!(m, n, inserted, "restoring bloom filter from captured state");
        Ok(Self { geometry, bits, inserted, _digest: PhantomData })
    }

    fn positions(&self, data: &[u8]) -> Vec<u64> {
        derive_indices::<D>(data, self.geometry.hashes as usize)
            .into_iter()
            .map(|h| reduce(h, self.geometry.size_bits))
            .collect()
    }

    /// Register a byte string. The insertion counter increments
    /// unconditionally; duplicates are not detected.
    pub fn add_bytes(&mut self, data: &[u8]) -> Result<()> {
        for idx in self.positions(data) {
            self.bits.set(idx, true)?;
        }
        self.inserted += 1;
        Ok(())
    }

    /// Register an element through its canonical byte encoding.
    pub fn add(&mut self, element: &impl ByteEncoded) -> Result<()> {
        self.add_bytes(&element.encode())
    }

    /// Register every element. Side-effecting, so unlike
    /// [`contains_all`](Self::contains_all) there is no short-circuit.
    pub fn add_all<T: ByteEncoded>(&mut self, elements: &[T]) -> Result<()> {
        for e in elements {
            self.add(e)?;
        }
        Ok(())
    }

    /// True if the byte string could have been inserted. Never a false
    /// negative; false positives occur at the rate the geometry predicts.
    pub fn contains_bytes(&self, data: &[u8]) -> Result<bool> {
        for idx in self.positions(data) {
            if !self.bits.get(idx)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn contains(&self, element: &impl ByteEncoded) -> Result<bool> {
        self.contains_bytes(&element.encode())
    }

    /// True only if every element could have been inserted; stops at the
    /// first definite miss.
    pub fn contains_all<T: ByteEncoded>(&self, elements: &[T]) -> Result<bool> {
        for e in elements {
            if !self.contains(e)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Zero every bit and reset the insertion counter; geometry is
    /// unchanged.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.inserted = 0;
        debug!(m = self.geometry.size_bits, "cleared bloom filter");
    }

    /// Read a single bit, bypassing the hash layer.
    pub fn get_bit(&self, index: u64) -> Result<bool> {
        self.bits.get(index)
    }

    /// Write a single bit, bypassing the hash layer.
    pub fn set_bit(&mut self, index: u64, value: bool) -> Result<()> {
        self.bits.set(index, value)
    }

    /// Total bits (m).
    pub fn size(&self) -> u64 {
        self.geometry.size_bits
    }

    /// Insertions since construction or the last [`clear`](Self::clear).
    pub fn count(&self) -> u64 {
        self.inserted
    }

    /// Hash derivations per element (k).
    pub fn hashes(&self) -> u32 {
        self.geometry.hashes
    }

    /// Expected number of distinct elements (n).
    pub fn expected_items(&self) -> u64 {
        self.geometry.expected_items
    }

    /// Configured density, fixed at construction (c).
    pub fn expected_bits_per_item(&self) -> f64 {
        self.geometry.bits_per_item
    }

    /// Actual density, `size() / count()`. Infinite while the filter is
    /// empty; the guard is the caller's.
    pub fn bits_per_item(&self) -> f64 {
        self.geometry.size_bits as f64 / self.inserted as f64
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Borrow the underlying bit storage.
    pub fn bit_set(&self) -> &PagedBitSet {
        &self.bits
    }

    /// Give up the filter and keep its bit storage, e.g. for persisting.
    pub fn into_bit_set(self) -> PagedBitSet {
        self.bits
    }

    /// False positive probability assuming `n` elements were inserted.
    pub fn expected_fp_rate(&self) -> f64 {
        self.geometry.fp_rate(self.geometry.expected_items as f64)
    }

    /// False positive probability at the current insertion count.
    pub fn current_fp_rate(&self) -> f64 {
        self.geometry.fp_rate(self.inserted as f64)
    }

    /// False positive probability after a hypothetical `items` insertions.
    pub fn fp_rate_for(&self, items: f64) -> f64 {
        self.geometry.fp_rate(items)
    }
}

impl<D: Digest> PartialEq for BloomFilter<D> {
    // Geometry and bit contents decide equality; the insertion counter is
    // bookkeeping and stays out of it.
    fn eq(&self, other: &Self) -> bool {
        self.geometry.expected_items == other.geometry.expected_items
            && self.geometry.hashes == other.geometry.hashes
            && self.geometry.size_bits == other.geometry.size_bits
            && self.bits == other.bits
    }
}

impl<D: Digest> Clone for BloomFilter<D> {
    fn clone(&self) -> Self {
        Self {
            geometry: self.geometry,
            bits: self.bits.clone(),
            inserted: self.inserted,
            _digest: PhantomData,
        }
    }
}

impl<D: Digest> std::fmt::Debug for BloomFilter<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BloomFilter")
            .field("geometry", &self.geometry)
            .field("inserted", &self.inserted)
            .field("pages", &self.bits.page_count())
            .finish()
    }
}
