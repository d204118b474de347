use {
    crate::{util::History, Key, Primer, PrimerError},
    std::{marker::PhantomData, sync::Arc},
};

/// Marker type selecting the encrypting half of [`Processor`].
#[derive(Debug, Clone, Copy)]
pub enum Encrypt {}
/// Marker type selecting the decrypting half of [`Processor`].
#[derive(Debug, Clone, Copy)]
pub enum Decrypt {}

/// The per-byte transform a [`Processor`] applies once it knows a byte is
/// in the key's alphabet. `Encrypt` and `Decrypt` are the only
/// implementors; this mirrors the reference cipher's dispatch through a
/// converter function, just expressed as a trait instead of a function
/// pointer.
pub trait Mode {
    fn step(key: &Key, encoder: &[Option<u8>; 256], prefix: &mut History, index: u8) -> u8;
}

impl Mode for Encrypt {
    fn step(key: &Key, _encoder: &[Option<u8>; 256], prefix: &mut History, index: u8) -> u8 {
        let out = key.encode(prefix, index);
        prefix.push(index);
        out
    }
}

impl Mode for Decrypt {
    fn step(key: &Key, encoder: &[Option<u8>; 256], prefix: &mut History, index: u8) -> u8 {
        let out = key.decode(prefix, index);
        let reencoded = encoder[out as usize].expect("a decoded byte is always in the key's alphabet");
        prefix.push(reencoded);
        out
    }
}

/// A stateful stream transformer holding a [`Key`] and a rolling history
/// (the Markov "prefix") of the last `prefix_len` encoded indices.
///
/// `Processor<Encrypt>` is [`Encrypter`]; `Processor<Decrypt>` is
/// [`Decrypter`]. Both share this same state and byte-recognition logic,
/// differing only in [`Mode::step`].
///
/// A `Processor` is mutable (`process` advances its history) and must not
/// be called concurrently from multiple threads. Two `Processor`s built
/// from the same `(Key, Primer)` start in identical states and diverge
/// only as they consume different input.
#[derive(Debug, Clone)]
pub struct Processor<M> {
    key: Arc<Key>,
    encoder: Box<[Option<u8>; 256]>,
    decoder: Box<[u8; 256]>,
    prefix: History,
    mode: PhantomData<M>,
}

/// Encrypts plaintext bytes into ciphertext of equal length.
pub type Encrypter = Processor<Encrypt>;
/// Decrypts ciphertext bytes back into the original plaintext.
pub type Decrypter = Processor<Decrypt>;

impl<M: Mode> Processor<M> {
    /// Build a processor from a shared key and a primer compatible with
    /// it.
    pub fn new(key: Arc<Key>, primer: &Primer) -> Result<Self, PrimerError> {
        primer.test_key(&key)?;

        let mut encoder = Box::new([None; 256]);
        for (i, &byte) in key.order().iter().enumerate() {
            encoder[byte as usize] = Some(i as u8);
        }

        let mut decoder = Box::new([0u8; 256]);
        for (i, &byte) in key.order().iter().enumerate() {
            decoder[i] = byte;
        }

        let prefix_data = primer
            .data()
            .iter()
            .map(|&byte| encoder[byte as usize].expect("primer already validated against this key"))
            .collect();

        Ok(Self { key, encoder, decoder, prefix: History::new(prefix_data), mode: PhantomData })
    }

    /// Transform `input`, producing output of the same length.
    ///
    /// Bytes outside the key's alphabet pass through unchanged at the
    /// same position and do not advance the rolling history; recognized
    /// bytes are transformed via [`Mode::step`], which also advances the
    /// history.
    pub fn process(&mut self, input: &[u8]) -> Vec<u8> {
        input
            .iter()
            .map(|&value| match self.encoder[value as usize] {
                Some(index) => M::step(&self.key, &self.encoder, &mut self.prefix, index),
                None => value,
            })
            .collect()
    }

    /// Export the current rolling history as a fresh [`Primer`]. Feeding
    /// it to a new `Processor` built on the same [`Key`] yields a
    /// processor in an equivalent state to this one, right now.
    pub fn current_primer(&self) -> Primer {
        let data: Vec<u8> = self.prefix.iter().map(|index| self.decoder[index as usize]).collect();
        Primer::from_data(data).expect("a key-derived history is never empty")
    }
}
