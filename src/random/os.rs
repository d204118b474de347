use crate::RandomSource;

/// The default [`RandomSource`], backed by the host's CSPRNG via the
/// `getrandom` crate.
///
/// `getrandom` dispatches per-platform to the facility a caller would
/// otherwise have to pick by hand: `BCryptGenRandom`/`CryptGenRandom` on
/// Windows, `getrandom(2)` (falling back to `/dev/urandom`) on Linux and
/// most other Unix-likes, and the equivalent primitive on every other
/// platform it supports.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomSource;

impl RandomSource for OsRandomSource {
    fn fill(&mut self, buf: &mut [u8]) {
        getrandom::getrandom(buf).expect("OS CSPRNG read failed");
    }
}
