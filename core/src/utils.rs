use serde::Serializer;

/// Serialize bytes as a lowercase hex string.
pub fn serialize_hex<T, S>(bytes: &T, s: S) -> Result<S::Ok, S::Error>
where
    T: AsRef<[u8]>,
    S: Serializer,
{
    s.serialize_str(&hex::encode(bytes.as_ref()))
}

/// Printable text as `b"..."`, anything else as `0x<hex>`.
pub fn fmt_bytes(b: &[u8]) -> String {
    if b.iter().all(|&c| c.is_ascii_graphic() || c == b' ') {
        format!("b\"{}\"", String::from_utf8_lossy(b))
    } else {
        format!("0x{}", hex::encode(b))
    }
}

#[cfg(test)]
mod tests {
    use super::fmt_bytes;

    #[test]
    fn fmt_bytes_printable_and_binary() {
        assert_eq!(fmt_bytes(b"TC7200"), "b\"TC7200\"");
        assert_eq!(fmt_bytes(&[0xde, 0xad]), "0xdead");
    }
}
