use rand::RngCore;
use uuid::Builder;

/// Random v4 identifier drawn from the thread-local generator.
pub fn generate_uuid() -> String {
    generate_uuid_with(&mut rand::rng())
}

/// Random v4 identifier drawn from `rng`; lowercase 8-4-4-4-12 hex.
pub fn generate_uuid_with<R: RngCore + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Builder::from_random_bytes(bytes)
        .into_uuid()
        .hyphenated()
        .to_string()
}

#[cfg(test)]
pub(crate) fn is_v4_shape(candidate: &str) -> bool {
    let groups: Vec<&str> = candidate.split('-').collect();
    let lengths: Vec<usize> = groups.iter().map(|group| group.len()).collect();
    if lengths != [8, 4, 4, 4, 12] {
        return false;
    }
    if !candidate
        .chars()
        .all(|c| c == '-' || c.is_ascii_digit() || ('a'..='f').contains(&c))
    {
        return false;
    }
    groups[2].starts_with('4') && groups[3].starts_with(['8', '9', 'a', 'b'])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    proptest! {
        #[test]
        fn output_has_v4_shape(seed in any::<u64>()) {
            let id = generate_uuid_with(&mut StdRng::seed_from_u64(seed));
            prop_assert!(is_v4_shape(&id), "unexpected uuid {}", id);
        }
    }

    #[test]
    fn thread_rng_output_has_v4_shape() {
        let id = generate_uuid();
        assert!(is_v4_shape(&id), "unexpected uuid {id}");
    }

    #[test]
    fn seeded_generators_are_reproducible() {
        let first = generate_uuid_with(&mut StdRng::seed_from_u64(7));
        let second = generate_uuid_with(&mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
        assert!(is_v4_shape(&first));
    }

    #[test]
    fn consecutive_ids_differ() {
        assert_ne!(generate_uuid(), generate_uuid());
    }

    #[test]
    fn version_and_variant_bits_are_forced() {
        struct Saturated;

        impl RngCore for Saturated {
            fn next_u32(&mut self) -> u32 {
                u32::MAX
            }

            fn next_u64(&mut self) -> u64 {
                u64::MAX
            }

            fn fill_bytes(&mut self, dst: &mut [u8]) {
                dst.fill(0xff);
            }
        }

        assert_eq!(
            generate_uuid_with(&mut Saturated),
            "ffffffff-ffff-4fff-bfff-ffffffffffff"
        );
    }
}
