//! 128-bit proxy identifiers and their collision-free generation.
//!
//! An [`Identifier`] is stored as four signed 32-bit words, the layout the game
//! engine uses for entity UUIDs. It has two textual projections:
//!
//! * the canonical dashed hex string (`xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`), built
//!   from the unsigned bit pattern of each word, used for exclusion checks and as
//!   an entity selector;
//! * the native literal `UUID:[I; a, b, c, d]`, built from the signed value of
//!   each word, embedded in summon commands.
//!
//! Both forms carry the exact bit pattern, so either parses back to the same
//! identifier.

use crate::error::{Error, Result};
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Default cap on redraws before [`IdentifierGenerator`] gives up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 1024;

const NATIVE_PREFIX: &str = "UUID:[I;";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identifier([i32; 4]);

impl Identifier {
    pub fn from_words(words: [i32; 4]) -> Self {
        Self(words)
    }

    pub fn words(&self) -> [i32; 4] {
        self.0
    }

    /// The canonical dashed hex string.
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// The engine literal, e.g. `UUID:[I; 1, -2, 3, -4]`.
    pub fn native_literal(&self) -> String {
        let [a, b, c, d] = self.0;
        format!("{NATIVE_PREFIX} {a}, {b}, {c}, {d}]")
    }

    /// Parses the form produced by [`native_literal`](Self::native_literal).
    ///
    /// Components may also be given as unsigned magnitudes (`0..=u32::MAX`); they
    /// are reinterpreted as the same bit pattern.
    pub fn from_native_literal(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidIdentifier(s.to_string());
        let body = s
            .trim()
            .strip_prefix(NATIVE_PREFIX)
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(invalid)?;

        let mut words = [0i32; 4];
        let mut parts = body.split(',');
        for word in &mut words {
            let part = parts.next().ok_or_else(invalid)?.trim();
            *word = match part.parse::<i32>() {
                Ok(v) => v,
                Err(_) => part.parse::<u32>().map_err(|_| invalid())? as i32,
            };
        }
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self(words))
    }

    /// Parses either textual projection.
    pub fn parse_any(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.starts_with(NATIVE_PREFIX) {
            Self::from_native_literal(s)
        } else {
            s.parse()
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [h0, h1, h2, h3] = self.0.map(|w| w as u32);
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:04x}{:08x}",
            h0,
            h1 >> 16,
            h1 & 0xffff,
            h2 >> 16,
            h2 & 0xffff,
            h3
        )
    }
}

impl FromStr for Identifier {
    type Err = Error;

    /// Parses the canonical dashed hex string.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidIdentifier(s.to_string());
        let groups: Vec<&str> = s.trim().split('-').collect();
        let lengths = groups.iter().map(|g| g.len()).collect::<Vec<_>>();
        if lengths != [8, 4, 4, 4, 12]
            || !groups.iter().all(|g| g.bytes().all(|b| b.is_ascii_hexdigit()))
        {
            return Err(invalid());
        }

        let hex: String = groups.concat();
        let mut words = [0i32; 4];
        for (i, word) in words.iter_mut().enumerate() {
            let chunk = hex.get(i * 8..i * 8 + 8).ok_or_else(invalid)?;
            *word = u32::from_str_radix(chunk, 16).map_err(|_| invalid())? as i32;
        }
        Ok(Self(words))
    }
}

/// Draws random identifiers that avoid a given exclusion set.
pub struct IdentifierGenerator<R> {
    rng: R,
    max_attempts: usize,
}

impl IdentifierGenerator<rand::rngs::ThreadRng> {
    /// A generator backed by the thread-local RNG.
    pub fn from_thread_rng() -> Self {
        Self::new(rand::rng())
    }
}

impl<R: Rng> IdentifierGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Caps the number of draws per identifier (builder pattern). A cap of zero
    /// is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Draws an identifier whose canonical string is not in `excluded`.
    ///
    /// Does not modify `excluded`; callers minting several identifiers must insert
    /// each accepted one before asking for the next (see
    /// [`mint_batch`](Self::mint_batch)).
    pub fn next_identifier(&mut self, excluded: &HashSet<String>) -> Result<Identifier> {
        for attempt in 1..=self.max_attempts {
            let id = Identifier(self.rng.random());
            let canonical = id.canonical();
            if !excluded.contains(&canonical) {
                debug!(%canonical, attempt, "minted identifier");
                return Ok(id);
            }
            warn!(%canonical, attempt, "identifier collision, redrawing");
        }
        Err(Error::IdentifierSpaceExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Mints `count` identifiers, adding each to `excluded` as it is accepted.
    pub fn mint_batch(
        &mut self,
        count: usize,
        excluded: &mut HashSet<String>,
    ) -> Result<Vec<Identifier>> {
        let mut minted = Vec::with_capacity(count);
        for _ in 0..count {
            let id = self.next_identifier(excluded)?;
            excluded.insert(id.canonical());
            minted.push(id);
        }
        Ok(minted)
    }
}
