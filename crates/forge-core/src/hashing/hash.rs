//! Hash helpers sobre blake3. Devuelven hex en minúsculas.

use blake3::Hasher;

pub fn hash_bytes(input: &[u8]) -> String {
    let mut h = Hasher::new();
    h.update(input);
    h.finalize().to_hex().to_string()
}
