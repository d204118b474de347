//! Markov Encryption (ME) is a symmetric, byte-oriented stream cipher built
//! from a stack of alphabet permutations (a [`Key`]) and a rolling history
//! window (seeded by a [`Primer`]). It fuses a Markov-chain style rolling
//! context with Sudoku-like Latin-square constraints on the lookup tables
//! that drive encoding and decoding.
//!
//! A sender and receiver who share a [`Key`] and a [`Primer`] can run an
//! [`Encrypter`] and a [`Decrypter`] respectively; both are specializations
//! of [`Processor`]. Bytes outside the key's alphabet pass through
//! unchanged.
//!
//! This is a pedagogical cipher. No claim of cryptographic strength against
//! modern adversaries is made; see [`doc::security`] for why.

#[cfg(doc)]
pub mod doc;

#[cfg(test)]
mod test;

mod error;
mod key;
mod primer;
mod processor;
mod random;
mod util;

pub use {
    error::{KeyError, PrimerError},
    key::Key,
    primer::Primer,
    processor::{Decrypter, Encrypter, Processor},
    random::{OsRandomSource, RandomSource},
};
