/// Width of a stored timestamp value in bytes
pub const TIMESTAMP_LEN: usize = 4;

/// Unix timestamp as stored in a timestamp field
pub type UnixTimestamp = u32;

/// Current wall-clock time as a 32-bit Unix timestamp
pub fn unix_now() -> UnixTimestamp {
    chrono::Utc::now().timestamp() as UnixTimestamp
}

/// Encode a timestamp as native-endian bytes
pub fn encode_timestamp(ts: UnixTimestamp) -> [u8; TIMESTAMP_LEN] {
    ts.to_ne_bytes()
}

/// Decode a timestamp value
///
/// Returns `None` unless the value is exactly [`TIMESTAMP_LEN`] bytes.
pub fn decode_timestamp(bytes: &[u8]) -> Option<UnixTimestamp> {
    let raw: [u8; TIMESTAMP_LEN] = bytes.try_into().ok()?;
    Some(UnixTimestamp::from_ne_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_encoding() {
        let ts: UnixTimestamp = 1_700_000_000;
        let bytes = encode_timestamp(ts);
        assert_eq!(bytes.len(), TIMESTAMP_LEN);
        assert_eq!(decode_timestamp(&bytes), Some(ts));
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        assert_eq!(decode_timestamp(b""), None);
        assert_eq!(decode_timestamp(b"abc"), None);
        assert_eq!(decode_timestamp(b"200.24"), None);
        assert_eq!(decode_timestamp(&[0u8; 8]), None);
    }

    #[test]
    fn test_unix_now_is_recent() {
        // 2020-01-01T00:00:00Z
        assert!(unix_now() > 1_577_836_800);
    }
}
