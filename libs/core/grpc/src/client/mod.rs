//! Wire conventions shared by every users-service client and server.
//!
//! Generated tonic clients and servers expose the same builder methods
//! (`accept_compressed`, `send_compressed`, `max_*_message_size`) but no
//! common trait, so the values live here and each side applies them.

use tonic::codec::CompressionEncoding;

/// Compression used in both directions
pub const DEFAULT_COMPRESSION: CompressionEncoding = CompressionEncoding::Zstd;

/// Maximum encoded and decoded message size (8MB)
pub const DEFAULT_MAX_MESSAGE_SIZE: usize = 8 * 1024 * 1024;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(DEFAULT_COMPRESSION, CompressionEncoding::Zstd);
        assert_eq!(DEFAULT_MAX_MESSAGE_SIZE, 8_388_608);
    }
}
