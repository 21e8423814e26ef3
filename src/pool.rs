//! Recipient pool shared by every sender in a run.

use crate::error::LoadError;
use rand::Rng;
use rand::seq::SliceRandom;
use std::path::Path;

/// Shuffled recipient list consumed strictly from the front.
///
/// The list itself is never mutated after construction; a cursor tracks how
/// many entries have been handed out, so a taken address is never seen again.
#[derive(Debug, Clone)]
pub struct AddressPool {
    addresses: Vec<String>,
    cursor: usize,
}

impl AddressPool {
    pub fn new(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            cursor: 0,
        }
    }

    /// Reads a line-delimited address file, shuffles it and wraps it in a pool.
    pub fn from_file<P: AsRef<Path>, R: Rng + ?Sized>(
        path: P,
        rng: &mut R,
    ) -> Result<Self, LoadError> {
        let mut addresses = load(path)?;
        shuffle(&mut addresses, rng);
        Ok(Self::new(addresses))
    }

    /// Removes and returns the front address, or `None` once drained.
    pub fn take_next(&mut self) -> Option<String> {
        let next = self.addresses.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(next)
    }

    pub fn remaining(&self) -> usize {
        self.addresses.len() - self.cursor
    }

    pub fn taken(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }
}

pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<String>, LoadError> {
    let path = path.as_ref();
    let data = std::fs::read_to_string(path).map_err(|source| LoadError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;

    let addresses = parse(&data);
    if addresses.is_empty() {
        return Err(LoadError::EmptyInput {
            path: path.to_path_buf(),
        });
    }
    Ok(addresses)
}

/// One address per line; surrounding whitespace and blank lines are dropped.
pub fn parse(data: &str) -> Vec<String> {
    data.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Unbiased in-place Fisher-Yates permutation.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    items.shuffle(rng);
}
