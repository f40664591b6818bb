//! Encrypted transfer payload

/// The filename and content of a transfer, each already sealed under the
/// session's shared key
///
/// `total_parts`/`part_num` are reserved for future chunking; the
/// current protocol always uses exactly one part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// `encrypt(key, filename_bytes)`
    pub filename: Vec<u8>,
    /// `encrypt(key, file_bytes)`
    pub data: Vec<u8>,
    /// Total number of parts in this transfer
    pub total_parts: u32,
    /// Index of this part
    pub part_num: u32,
}

impl EncryptedPayload {
    /// Build a single-part payload, the only shape the current protocol uses
    pub fn single_part(filename: Vec<u8>, data: Vec<u8>) -> Self {
        Self {
            filename,
            data,
            total_parts: 1,
            part_num: 0,
        }
    }

    /// Whether this is the last (and, today, only) part of the transfer
    pub fn is_final_part(&self) -> bool {
        self.part_num + 1 == self.total_parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_part_is_final() {
        let payload = EncryptedPayload::single_part(vec![1], vec![2, 3]);
        assert_eq!(payload.total_parts, 1);
        assert_eq!(payload.part_num, 0);
        assert!(payload.is_final_part());
    }
}
