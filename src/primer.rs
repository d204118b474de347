use crate::{Key, PrimerError, RandomSource};

/// The initial history a [`Processor`](crate::Processor) starts from: `L`
/// plaintext bytes drawn from a [`Key`]'s alphabet, where `L` is the key's
/// [`prefix_len`](Key::prefix_len).
///
/// Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Primer {
    data: Vec<u8>,
}

impl Primer {
    /// Generate a fresh primer for `key`, drawing each of its `L` bytes
    /// independently and uniformly from `key.base()`.
    pub fn create(key: &Key, random: &mut impl RandomSource) -> Self {
        let data = (0..key.prefix_len()).map(|_| random.random_choice(key.base())).collect();
        Self { data }
    }

    /// Build a primer from explicit bytes, requiring only that they are
    /// non-empty.
    ///
    /// Compatibility with a particular [`Key`] (length and alphabet) is a
    /// separate concern; see [`Primer::for_key`].
    pub fn from_data(data: Vec<u8>) -> Result<Self, PrimerError> {
        if data.is_empty() {
            return Err(PrimerError::Empty);
        }
        Ok(Self { data })
    }

    /// Build a primer from explicit bytes and check it against `key` in
    /// the same step.
    pub fn for_key(data: Vec<u8>, key: &Key) -> Result<Self, PrimerError> {
        let primer = Self::from_data(data)?;
        primer.test_key(key)?;
        Ok(primer)
    }

    /// The bytes this primer was built from.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raise an error if `key` is not compatible with this primer: the
    /// lengths must match, and every byte here must be in `key`'s
    /// alphabet.
    pub(crate) fn test_key(&self, key: &Key) -> Result<(), PrimerError> {
        if self.data.len() != key.prefix_len() {
            return Err(PrimerError::Length { expected: key.prefix_len(), actual: self.data.len() });
        }
        if self.data.iter().any(|b| !key.base().contains(b)) {
            return Err(PrimerError::Alphabet);
        }
        Ok(())
    }
}
