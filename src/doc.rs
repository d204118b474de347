//! Literate background reading for this crate, built only for `cargo doc`.

pub mod security;
