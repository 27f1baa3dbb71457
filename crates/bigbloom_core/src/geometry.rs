//! Filter geometry: how many bits, how many hashes.
//!
//! Three parameterizations normalize into the same `(m, k, n, c)` tuple:
//! density-driven `(c, n, k)`, size-driven `(m, n)` and accuracy-driven
//! `(p, n)`.

use crate::errors::{BloomError, Result};
use serde::{Deserialize, Serialize};
use std::f64::consts::LN_2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    /// Total bits in the filter (m).
    pub size_bits: u64,
    /// Hash derivations per element (k).
    pub hashes: u32,
    /// Expected number of distinct elements (n).
    pub expected_items: u64,
    /// Configured density, m/n (c).
    pub bits_per_item: f64,
}

impl Geometry {
    /// Density-driven: `m = ceil(c * n)`.
    pub fn from_bits_per_item(c: f64, n: u64, k: u32) -> Result<Self> {
        if n == 0 {
            return Err(BloomError::InvalidConfig("expected item count must be at least 1".into()));
        }
        if !c.is_finite() || c <= 0.0 {
            return Err(BloomError::InvalidConfig(format!("bits per item must be positive, got {c}")));
        }
        if k == 0 {
            return Err(BloomError::InvalidConfig("hash count must be at least 1".into()));
        }
        Ok(Self {
            size_bits: (c * n as f64).ceil() as u64,
            hashes: k,
            expected_items: n,
            bits_per_item: c,
        })
    }

    /// Size-driven: `c = m / n`, `k = round(c * ln 2)`, at least one hash.
    pub fn from_size(m: u64, n: u64) -> Result<Self> {
        if m == 0 {
            return Err(BloomError::InvalidConfig("filter size must be at least 1 bit".into()));
        }
        if n == 0 {
            return Err(BloomError::InvalidConfig("expected item count must be at least 1".into()));
        }
        let c = m as f64 / n as f64;
        Ok(Self {
            size_bits: m,
            hashes: ((c * LN_2).round() as u32).max(1),
            expected_items: n,
            bits_per_item: c,
        })
    }

    /// Accuracy-driven: `k = ceil(-log2 p)`, `c = k / ln 2`.
    pub fn from_fp_rate(p: f64, n: u64) -> Result<Self> {
        if !p.is_finite() || p <= 0.0 || p >= 1.0 {
            return Err(BloomError::InvalidConfig(format!(
                "false positive rate must be in (0, 1), got {p}"
            )));
        }
        let k = (-p.log2()).ceil();
        Self::from_bits_per_item(k / LN_2, n, k as u32)
    }

    /// False positive probability after `items` insertions:
    /// `(1 - e^(-k * items / m))^k`.
    pub fn fp_rate(&self, items: f64) -> f64 {
        let k = self.hashes as f64;
        (1.0 - (-k * items / self.size_bits as f64).exp()).powf(k)
    }
}
