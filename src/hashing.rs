//! Hash functions for strings, to be injected into a `HashSet`
//!
//! They range from useless to reasonable, which makes them handy for comparing how the quality of
//! a hash affects chain lengths. All of them work on the UTF-8 bytes of the string and wrap on
//! overflow.

#![warn(missing_docs)]

/// Hash every string to zero.
///
/// All keys end up in a single chain, turning a `HashSet` into a linked list.
#[inline]
pub fn hash_as_zero(_word: &str) -> u32 {
    0
}

/// Hash a string to the sum of its bytes.
///
/// Anagrams collide, and short words crowd into a narrow band of values.
pub fn hash_as_sum(word: &str) -> u32 {
    word.bytes()
        .fold(0u32, |hash, byte| hash.wrapping_add(u32::from(byte)))
}

/// Hash a string by repeatedly multiplying by 37 and adding the next byte.
pub fn hash_as_product(word: &str) -> u32 {
    word.bytes().fold(0u32, |hash, byte| {
        hash.wrapping_mul(37).wrapping_add(u32::from(byte))
    })
}

//-----------------------------------------------------------------------------------------------//

#[test]
// Known values
fn test_hashing_0() {
    debug_assert_eq!(hash_as_zero("anything"), 0);

    debug_assert_eq!(hash_as_sum(""), 0);
    debug_assert_eq!(hash_as_sum("ab"), 195);
    debug_assert_eq!(hash_as_sum("ba"), 195);

    debug_assert_eq!(hash_as_product(""), 0);
    debug_assert_eq!(hash_as_product("ab"), 97 * 37 + 98);
    debug_assert_ne!(hash_as_product("ab"), hash_as_product("ba"));
}

#[test]
// Long words wrap rather than overflow
fn test_hashing_1() {
    let bytes = [b'z'; 1000];
    let word = core::str::from_utf8(&bytes).unwrap();

    debug_assert_eq!(hash_as_sum(word), 122 * 1000);
    debug_assert_eq!(hash_as_sum(&word[..1]), 122);
    let _ = hash_as_product(word);
}
