//! Markov Encryption is a pedagogical cipher, not a vetted one.
//!
//! # What it actually hides
//!
//! Every ciphertext byte is a function of the plaintext byte and a rolling
//! window of the last `L` encoded indices — the [`Key`](crate::Key)'s
//! `axes` tables and `decoder` rows guarantee that, for a fixed history,
//! the plaintext-to-ciphertext mapping is a bijection over the alphabet.
//! This gives the cipher *some* resistance to frequency analysis on short
//! windows, since the same plaintext byte maps to different ciphertext
//! bytes as the history changes underneath it.
//!
//! # What it does not claim
//!
//! There is no published analysis of this construction's resistance to
//! known-plaintext or chosen-plaintext attacks, no authentication tag, and
//! no protection against an attacker who can query the
//! [`Encrypter`](crate::Encrypter)/[`Decrypter`](crate::Decrypter) as an
//! oracle. The alphabet size bounds the keyspace per history slot to
//! `size!`-ish, which for small alphabets (the crate accepts alphabets as
//! small as two bytes) is trivially brute-forceable.
//!
//! Treat this crate as a way to study Markov-chain-driven substitution, not
//! as a component of a real security boundary.
