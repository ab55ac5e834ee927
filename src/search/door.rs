use tracing::debug;

use crate::core::error::Result;
use crate::core::results::DoorPasswords;
use crate::core::traits::HashProvider;
use crate::hashing::Digests;

pub const PASSWORD_LEN: usize = 8;

/// Highest index tried before giving up on a door id.
pub const DEFAULT_DOOR_LIMIT: u64 = 100_000_000;

/// Leading zeros that make a digest interesting.
const INTERESTING_ZEROS: usize = 5;

/// Recover both door passwords in one pass over the interesting digests.
///
/// The first password appends the sixth hex character of each interesting
/// digest. The second puts the seventh character at the position named by
/// the sixth, if that position is in range and still empty. Returns `None`
/// when `limit` indices pass before both passwords are complete.
pub fn crack<P: HashProvider + ?Sized>(provider: &mut P, limit: u64) -> Result<Option<DoorPasswords>> {
    let mut first = String::with_capacity(PASSWORD_LEN);
    let mut second: [Option<char>; PASSWORD_LEN] = [None; PASSWORD_LEN];

    for item in Digests::new(provider, 0).until(limit) {
        let (index, digest) = item?;
        if !digest.has_zero_prefix(INTERESTING_ZEROS) {
            continue;
        }
        let (Some(sixth), Some(seventh)) = (digest.char_at(5), digest.char_at(6)) else {
            continue;
        };
        debug!("Interesting digest {} at index {}", digest, index);

        if first.len() < PASSWORD_LEN {
            first.push(sixth);
        }

        if let Some(position) = sixth.to_digit(16).map(|d| d as usize) {
            if position < PASSWORD_LEN && second[position].is_none() {
                second[position] = Some(seventh);
            }
        }

        if first.len() == PASSWORD_LEN && second.iter().all(Option::is_some) {
            return Ok(Some(DoorPasswords {
                first,
                second: second.iter().flatten().collect(),
            }));
        }
    }

    debug!(
        "Gave up after {} indices with passwords {:?} and {:?}",
        limit, first, second
    );
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PadHunterError;
    use crate::hashing::Digest;
    use mockall::mock;

    mock! {
        Provider {}
        impl HashProvider for Provider {
            fn name(&self) -> &str;
            fn digest(&mut self, index: u64) -> Result<Digest>;
            fn digests_computed(&self) -> u64;
        }
    }

    fn padded(prefix: &str) -> Digest {
        format!("{:f<32}", prefix).parse().unwrap()
    }

    /// Every tenth index is interesting, with (sixth, seventh) taken from `pairs`.
    fn scripted(pairs: &'static [(char, char)]) -> impl FnMut(u64) -> Result<Digest> + Send {
        move |index| {
            let slot = index as usize / 10;
            if index % 10 == 0 && slot >= 1 && slot <= pairs.len() {
                let (sixth, seventh) = pairs[slot - 1];
                Ok(padded(&format!("00000{}{}", sixth, seventh)))
            } else {
                Ok(padded("0000"))
            }
        }
    }

    #[test]
    fn test_crack_fills_both_passwords() {
        static PAIRS: [(char, char); 10] = [
            ('1', 'a'),
            ('9', 'b'),
            ('1', 'c'),
            ('0', 'd'),
            ('2', 'e'),
            ('3', 'f'),
            ('4', '0'),
            ('5', '1'),
            ('6', '2'),
            ('7', '3'),
        ];

        let mut provider = MockProvider::new();
        provider
            .expect_digest()
            .times(101)
            .returning(scripted(&PAIRS));

        let passwords = crack(&mut provider, 1000).unwrap().unwrap();
        assert_eq!(passwords.first, "19102345");
        assert_eq!(passwords.second, "daef0123");
    }

    #[test]
    fn test_crack_propagates_errors() {
        let mut provider = MockProvider::new();
        provider
            .expect_digest()
            .returning(|_| Err(PadHunterError::Interrupted));

        assert!(matches!(
            crack(&mut provider, DEFAULT_DOOR_LIMIT),
            Err(PadHunterError::Interrupted)
        ));
    }

    #[test]
    fn test_crack_gives_up_at_limit() {
        static PAIRS: [(char, char); 3] = [('1', 'a'), ('2', 'b'), ('3', 'c')];

        let mut provider = MockProvider::new();
        provider
            .expect_digest()
            .times(50)
            .returning(scripted(&PAIRS));

        assert_eq!(crack(&mut provider, 50).unwrap(), None);
    }
}
