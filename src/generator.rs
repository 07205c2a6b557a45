// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Random names and payloads for generated objects.

use crate::constants::naming::{KEY_PREFIX, NAME_RANDOM_BYTES};
use crate::error::EntropyError;
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, RngCore, SeedableRng};
use std::collections::BTreeMap;

/// How many keys a generated payload carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCount {
    Fixed(usize),
    /// Drawn uniformly from `min..=max` for every object
    Uniform { min: usize, max: usize },
}

impl KeyCount {
    pub fn new(min: usize, max: usize) -> Self {
        if min == max {
            KeyCount::Fixed(min)
        } else {
            KeyCount::Uniform { min, max }
        }
    }
}

/// Source of names and payloads. The random source is injected so runs can be
/// made reproducible with a seeded generator.
#[derive(Debug)]
pub struct PayloadGenerator<R> {
    rng: R,
}

impl PayloadGenerator<StdRng> {
    /// Seed a generator from the operating system's secure random source
    pub fn from_entropy() -> Result<Self, EntropyError> {
        Ok(Self::new(StdRng::from_rng(OsRng)?))
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: RngCore> PayloadGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// `<prefix>-<32 hex chars>`
    pub fn generate_name(&mut self, prefix: &str) -> Result<String, EntropyError> {
        let suffix = self.random_hex(NAME_RANDOM_BYTES)?;
        Ok(format!("{}-{}", prefix, suffix))
    }

    /// `key_count` entries keyed `key-00`, `key-01`, ... each holding
    /// `value_byte_length` random bytes hex-encoded.
    pub fn generate_payload(
        &mut self,
        key_count: usize,
        value_byte_length: usize,
    ) -> Result<BTreeMap<String, String>, EntropyError> {
        (0..key_count)
            .map(|i| -> Result<(String, String), EntropyError> {
                let value = self.random_hex(value_byte_length)?;
                Ok((format!("{}-{:02x}", KEY_PREFIX, i), value))
            })
            .collect()
    }

    pub fn sample_key_count(&mut self, key_count: KeyCount) -> usize {
        match key_count {
            KeyCount::Fixed(n) => n,
            KeyCount::Uniform { min, max } => self.rng.gen_range(min..=max),
        }
    }

    /// Uniform index in `0..bound`. `bound` must be non-zero.
    pub fn pick_index(&mut self, bound: usize) -> usize {
        self.rng.gen_range(0..bound)
    }

    fn random_hex(&mut self, len: usize) -> Result<String, EntropyError> {
        let mut bytes = vec![0u8; len];
        self.rng.try_fill_bytes(&mut bytes)?;
        Ok(hex::encode(bytes))
    }
}
