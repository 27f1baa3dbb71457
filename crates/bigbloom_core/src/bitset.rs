//! Paged bit storage.
//!
//! A single bit vector indexed by a 32-bit signed integer tops out at
//! 2^31 - 1 bits (~256 MiB). [`PagedBitSet`] chains fixed-capacity pages so
//! one logical bit space can grow far past that limit while callers keep
//! addressing it through a single u64 index.

use crate::consts::{PAGE_MAX_BITS, WORD_BITS};
use crate::errors::{BloomError, Result};
use serde::{Deserialize, Serialize};

/// One fixed-capacity bit vector, packed into u64 words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Page {
    nbits: u64,
    words: Vec<u64>,
}

impl Page {
    fn zeroed(nbits: u64) -> Self {
        let nwords = nbits.div_ceil(WORD_BITS) as usize;
        Self { nbits, words: vec![0u64; nwords] }
    }

    fn get(&self, off: u64) -> Result<bool> {
        if off >= self.nbits {
            return Err(BloomError::OutOfBounds { index: off, size: self.nbits });
        }
        let mask = 1u64 << (off % WORD_BITS);
        Ok(self.words[(off / WORD_BITS) as usize] & mask != 0)
    }

    fn set(&mut self, off: u64, value: bool) -> Result<()> {
        if off >= self.nbits {
            return Err(BloomError::OutOfBounds { index: off, size: self.nbits });
        }
        let w = &mut self.words[(off / WORD_BITS) as usize];
        let mask = 1u64 << (off % WORD_BITS);
        if value { *w |= mask } else { *w &= !mask }
        Ok(())
    }

    fn clear(&mut self) {
        self.words.fill(0);
    }
}

/// A bit-addressable space of arbitrary size.
///
/// Every page except possibly the last has capacity [`PAGE_MAX_BITS`]; the
/// last holds the remainder. The page sequence is fixed at construction and
/// only bit contents mutate afterwards. Equality is structural over the
/// ordered pages, which implies equal size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedBitSet {
    len: u64,
    page_cap: u64,
    pages: Vec<Page>,
}

impl PagedBitSet {
    /// Allocate `len` zeroed bits.
    pub fn with_len(len: u64) -> Self {
        Self::with_page_cap(len, PAGE_MAX_BITS)
    }

    fn with_page_cap(len: u64, page_cap: u64) -> Self {
        let n_pages = len.div_ceil(page_cap);
        let mut pages = Vec::with_capacity(n_pages as usize);
        for i in 0..n_pages {
            pages.push(Page::zeroed((len - i * page_cap).min(page_cap)));
        }
        Self { len, page_cap, pages }
    }

    // Division in u64: the logical index may exceed 32-bit range, the
    // resulting page number and offset never do.
    fn locate(&self, index: u64) -> (usize, u64) {
        ((index / self.page_cap) as usize, index % self.page_cap)
    }

    pub fn get(&self, index: u64) -> Result<bool> {
        let (page, off) = self.locate(index);
        self.pages
            .get(page)
            .ok_or(BloomError::OutOfBounds { index, size: self.len })?
            .get(off)
            .map_err(|_| BloomError::OutOfBounds { index, size: self.len })
    }

    pub fn set(&mut self, index: u64, value: bool) -> Result<()> {
        let (page, off) = self.locate(index);
        let size = self.len;
        self.pages
            .get_mut(page)
            .ok_or(BloomError::OutOfBounds { index, size })?
            .set(off, value)
            .map_err(|_| BloomError::OutOfBounds { index, size })
    }

    /// Zero every page in place; size and page count are unchanged.
    pub fn clear(&mut self) {
        for p in &mut self.pages {
            p.clear();
        }
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}
