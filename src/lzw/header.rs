//! `.Z` stream header parsing.

use std::io::{self, Read};

use tracing::debug;

use crate::lzw::types::{
    Header, LzwError, HDR_BLOCK_MODE, HDR_EXTENDED, HDR_FREE, HDR_MAXBITS, HEADER_SIZE,
    INIT_BITS, LZW_MAGIC, MAX_BITS,
};

/// Validates the 3 header bytes and decodes the flags byte.
///
/// Check order: magic, reserved bits, then width limits.
pub fn parse_header(bytes: &[u8; HEADER_SIZE]) -> Result<Header, LzwError> {
    let magic = u16::from_be_bytes([bytes[0], bytes[1]]);
    if magic != LZW_MAGIC {
        return Err(LzwError::BadMagic { found: magic });
    }

    let flags = bytes[2];
    if flags & (HDR_EXTENDED | HDR_FREE) != 0 {
        return Err(LzwError::UnsupportedExtension { flags });
    }

    let max_bits = u32::from(flags & HDR_MAXBITS);
    if max_bits > MAX_BITS {
        return Err(LzwError::ExcessiveWidth { max_bits });
    }
    if max_bits < INIT_BITS {
        return Err(LzwError::InsufficientWidth { max_bits });
    }

    let header = Header {
        magic,
        flags,
        block_mode: flags & HDR_BLOCK_MODE != 0,
        max_bits,
    };
    debug!(
        block_mode = header.block_mode,
        max_bits = header.max_bits,
        "parsed .Z header"
    );
    Ok(header)
}

/// Reads exactly 3 bytes from `src` and parses them.
///
/// A short source yields `TruncatedHeader`; other read failures pass through
/// unchanged.
pub fn read_header<R: Read>(src: &mut R) -> io::Result<Header> {
    let mut bytes = [0u8; HEADER_SIZE];
    let mut filled = 0;
    while filled < HEADER_SIZE {
        match src.read(&mut bytes[filled..]) {
            Ok(0) => return Err(LzwError::TruncatedHeader.into()),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(parse_header(&bytes)?)
}
