use {
    crate::{util::History, KeyError},
    docext::docext,
    std::collections::BTreeSet,
};

/// An immutable Markov Encryption key: a stack of `L + 1` permutations of a
/// shared byte alphabet, plus the lookup tables derived from them.
///
/// A `Key` is built once — via [`Key::create`] from a fresh alphabet, or
/// [`Key::from_data`] from explicit blocks — and then shared by reference,
/// typically behind an [`Arc`](std::sync::Arc), by any number of
/// [`Processor`](crate::Processor)s.
///
/// Write $L$ for `prefix_len` (one less than the number of blocks in
/// `data`) and $n$ for `size`. `offset` is
///
/// $$
/// \mathrm{offset} = -\negthickspace\sum_{k=1}^{L-1} \mathrm{index}\big(
/// \mathrm{base},\, \mathrm{data}_k[0] \big) \pmod n
/// $$
///
/// summed over blocks $1 .. L - 1$ — the last block, $\mathrm{data}_L$,
/// does not contribute. `encoder` is `base` rotated left by $\mathrm{offset}$
/// places.
///
/// `axes` holds $L$ tables of size $n$; table $j$ is built from block
/// $\mathrm{data}_{L-j}$, i.e. $\mathrm{axes}_0$ comes from the *last*
/// block and $\mathrm{axes}_{L-1}$ from the second. For a history $H =
/// h_0 h_1 \ldots h_{L-1}$ (indices into `base`),
///
/// $$
/// \mathrm{sum}(H) = \sum_{k=0}^{L-1} \mathrm{axes}_k[h_k]
/// $$
///
/// and encoding/decoding an index $c \in [0, n)$ against that history is
///
/// $$
/// \mathrm{encode}(H, c) = \mathrm{encoder}\big[(\mathrm{sum}(H) + c)
/// \bmod n\big] \qquad \mathrm{decode}(H, y) = \mathrm{decoder}\big[
/// \mathrm{sum}(H) \bmod n\big][y]
/// $$
///
/// where `decoder` row $(r + \mathrm{offset}) \bmod n$ is built by placing,
/// for each $v$ at position $i$ in `order`, the value $v$ at position
/// $\mathrm{index}(\mathrm{order}, \mathrm{base}[(r+i) \bmod n])$.
#[docext]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    data: Vec<Vec<u8>>,
    prefix_len: usize,
    base: Vec<u8>,
    size: usize,
    encoder: Vec<u8>,
    axes: Vec<Vec<u8>>,
    order: Vec<u8>,
    decoder: Vec<Vec<u8>>,
}

impl Key {
    /// Build a key from a fresh, randomly shuffled alphabet.
    ///
    /// `alphabet` is reduced to its unique byte set; `chain_size` blocks
    /// are produced by repeatedly shuffling that set with `random`. The
    /// caller is responsible for supplying at least two distinct bytes in
    /// `alphabet` and a `chain_size` of at least two; violating either
    /// surfaces as a [`KeyError`] from the underlying [`Key::from_data`]
    /// call.
    pub fn create(
        alphabet: &[u8],
        chain_size: usize,
        random: &mut impl crate::RandomSource,
    ) -> Result<Self, KeyError> {
        let mut selection: Vec<u8> =
            alphabet.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let mut blocks = Vec::with_capacity(chain_size);
        for _ in 0..chain_size {
            random.shuffle(&mut selection);
            blocks.push(selection.clone());
        }
        Self::from_data(blocks)
    }

    /// Build a key from explicit block data, validating it first.
    ///
    /// `data` must contain at least two blocks, each of at least two
    /// bytes, all the same length, all permutations of the same byte set.
    pub fn from_data(data: Vec<Vec<u8>>) -> Result<Self, KeyError> {
        test_data(&data)?;
        Ok(make_vars(data))
    }

    /// The block data this key was built from.
    pub fn data(&self) -> &[Vec<u8>] {
        &self.data
    }

    /// `L`, the length of the rolling history a [`Primer`](crate::Primer)
    /// and [`Processor`](crate::Processor) must carry for this key.
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// The canonical ordering of the alphabet (`data[0]`).
    pub fn base(&self) -> &[u8] {
        &self.base
    }

    /// The alphabet sorted ascending by byte value.
    pub fn order(&self) -> &[u8] {
        &self.order
    }

    /// `encode(H, c) = encoder[(sum(H) + c) mod size]`.
    ///
    /// `history` holds `prefix_len` encoded indices; `c` is itself an
    /// index in `[0, size)`, not a raw byte.
    pub(crate) fn encode(&self, history: &History, c: u8) -> u8 {
        let idx = (self.sum(history) + c as usize) % self.size;
        self.encoder[idx]
    }

    /// `decode(H, c) = decoder[sum(H) mod size][c]`.
    ///
    /// `c` is the encoded index of the ciphertext byte (its position in
    /// [`order`](Self::order)), not the raw byte itself.
    pub(crate) fn decode(&self, history: &History, c: u8) -> u8 {
        let row = self.sum(history) % self.size;
        self.decoder[row][c as usize]
    }

    /// `sum(H) = sum_k axes[k][h_k]`, over a history of exactly
    /// `prefix_len` encoded indices.
    fn sum(&self, history: &History) -> usize {
        debug_assert_eq!(
            history.len(),
            self.prefix_len,
            "history length must equal the key's prefix length"
        );
        history.iter().enumerate().map(|(k, h)| self.axes[k][h as usize] as usize).sum()
    }
}

/// Validate that `data` is at least two same-length, same-byte-set blocks
/// of unique bytes. This is the sole gate on [`Key::from_data`]; nothing
/// past this point can observe a half-built `Key`.
fn test_data(data: &[Vec<u8>]) -> Result<(), KeyError> {
    if data.len() < 2 {
        return Err(KeyError::Shape);
    }
    let first = &data[0];
    if first.len() < 2 {
        return Err(KeyError::Shape);
    }
    let group: BTreeSet<u8> = first.iter().copied().collect();
    if group.len() != first.len() {
        return Err(KeyError::Duplicate);
    }
    for block in &data[1..] {
        if block.len() != first.len() {
            return Err(KeyError::Shape);
        }
        let next_group: BTreeSet<u8> = block.iter().copied().collect();
        if next_group.len() != block.len() {
            return Err(KeyError::Duplicate);
        }
        if next_group != group {
            return Err(KeyError::Alphabet);
        }
    }
    Ok(())
}

/// Build the precomputed tables (offset, encoder, axes, order, decoder)
/// from already-validated block data; see the derivations on [`Key`]
/// itself.
fn make_vars(data: Vec<Vec<u8>>) -> Key {
    let prefix_len = data.len() - 1;
    let base = data[0].clone();
    let size = base.len();

    let offset = calculate_offset(&data, prefix_len, &base, size);
    let mut encoder = base.clone();
    encoder.rotate_left(offset);

    let axes = calculate_axes(&data, prefix_len, &base, size);

    let mut order = base.clone();
    order.sort_unstable();

    let decoder = calculate_decoder(&base, size, offset, &order);

    Key { data, prefix_len, base, size, encoder, axes, order, decoder }
}

pub(crate) fn index_of(haystack: &[u8], value: u8) -> usize {
    haystack
        .iter()
        .position(|&b| b == value)
        .expect("value must be present in haystack by construction")
}

fn calculate_offset(data: &[Vec<u8>], prefix_len: usize, base: &[u8], size: usize) -> usize {
    let mut sum: i64 = 0;
    for block in &data[1..prefix_len] {
        sum += index_of(base, block[0]) as i64;
    }
    crate::util::euclid_mod(-sum, size as i64) as usize
}

/// Build the `axes` tables.
///
/// Iterates `v = prefix_len, prefix_len - 1, ..., 1` (in that order,
/// `prefix_len` values total) and writes `data[v]`'s table into `axes[j]`
/// for `j = 0, 1, ..., prefix_len - 1` — so `axes[0]` comes from the
/// *last* block and `axes[prefix_len - 1]` from the second block. This
/// inversion must be preserved exactly; permuting it breaks the
/// encode/decode correspondence.
fn calculate_axes(data: &[Vec<u8>], prefix_len: usize, base: &[u8], size: usize) -> Vec<Vec<u8>> {
    (0..prefix_len)
        .map(|j| {
            let v = prefix_len - j;
            let block = &data[v];
            let mut table = vec![0u8; size];
            for (i, &byte) in block.iter().enumerate() {
                table[i] = index_of(base, byte) as u8;
            }
            table
        })
        .collect()
}

fn calculate_decoder(base: &[u8], size: usize, offset: usize, order: &[u8]) -> Vec<Vec<u8>> {
    let mut grid = vec![Vec::new(); size];
    for rotation in 0..size {
        let mut row = vec![0u8; size];
        for (i, &value) in order.iter().enumerate() {
            let slot = index_of(order, base[(rotation + i) % size]);
            row[slot] = value;
        }
        grid[(rotation + offset) % size] = row;
    }
    grid
}

