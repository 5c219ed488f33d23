///
/// FNV-1a 64-bit hash (compile-time safe).
///
/// Used for **static node identities**: the codegen layer hashes the
/// (namespace, owner, member) triple once at expansion time and embeds the
/// result as a literal. The same constant is never recomputed at run time.
///
/// - Deterministic across compilers and platforms
/// - `const fn`-compatible, so identities can live in `const` items
/// - Not cryptographic; never use it for anything security-sensitive
///
/// Reference: Fowler–Noll–Vo hash, FNV-1a variant (64-bit).
///
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

const fn fold(mut hash: u64, bytes: &[u8]) -> u64 {
    let mut i = 0;

    while i < bytes.len() {
        hash ^= bytes[i] as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }

    hash
}

#[must_use]
pub const fn fnv1a_64(bytes: &[u8]) -> u64 {
    fold(FNV_OFFSET, bytes)
}

/// Stable identity of a generated node declaration.
///
/// Hashes `namespace`, `owner`, and `member` joined with `.` without
/// allocating. Renaming any of the three strings changes the identity;
/// deprecation markers are display-only and must never be fed in here.
#[must_use]
pub const fn node_id(namespace: &str, owner: &str, member: &str) -> u64 {
    let hash = fold(FNV_OFFSET, namespace.as_bytes());
    let hash = fold(hash, b".");
    let hash = fold(hash, owner.as_bytes());
    let hash = fold(hash, b".");

    fold(hash, member.as_bytes())
}

///
/// TESTS
///
