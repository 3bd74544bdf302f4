// Numeric decoders and address reconstruction for /proc/net fields
//
// The kernel prints addresses as raw memory words in host order:
// IPv4 is one 32-bit word, IPv6 is four 32-bit words. Each word's bytes are
// laid out least-significant first, so "0100007F" is 127.0.0.1.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};

/// Hex characters that fit in a single u64 word
const WORD_HEX_LEN: usize = 16;

/// An address field split into at most two 64-bit words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexWords {
    /// First (or only) word
    pub high: u64,
    /// Remainder word; 0 when the field fit in one word
    pub low: u64,
    /// The field was wider than one word, so it holds a 16-byte address
    pub wide: bool,
}

/// Parse a hex string into an unsigned integer
pub fn hex_to_uint(hex: &str) -> Result<u64> {
    u64::from_str_radix(hex, 16).map_err(|e| Error::decode("hex", hex, e))
}

/// Split a hex address field into two 64-bit words
///
/// Fields longer than 16 characters are cut after the 16th character and
/// both halves decoded. Shorter fields decode as a single word with a zero
/// second word.
pub fn hex_to_words(hex: &str) -> Result<HexWords> {
    if hex.len() > WORD_HEX_LEN {
        if !hex.is_char_boundary(WORD_HEX_LEN) {
            return Err(Error::decode("hex address", hex, "not ASCII hex"));
        }
        let (head, tail) = hex.split_at(WORD_HEX_LEN);
        Ok(HexWords {
            high: hex_to_uint(head)?,
            low: hex_to_uint(tail)?,
            wide: true,
        })
    } else {
        Ok(HexWords {
            high: hex_to_uint(hex)?,
            low: 0,
            wide: false,
        })
    }
}

/// Parse a decimal string into a signed integer
pub fn dec_to_int(dec: &str) -> Result<i64> {
    dec.parse::<i64>().map_err(|e| Error::decode("decimal", dec, e))
}

/// Rebuild an address from its kernel word layout
///
/// Each 32-bit sub-word is written least-significant byte first: for IPv6
/// the order is the top then bottom half of `high`, then of `low`.
pub fn words_to_ip(words: HexWords) -> IpAddr {
    if words.wide {
        let mut octets = [0u8; 16];
        let sub_words = [
            (words.high >> 32) as u32,
            words.high as u32,
            (words.low >> 32) as u32,
            words.low as u32,
        ];
        for (chunk, word) in octets.chunks_exact_mut(4).zip(sub_words) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        IpAddr::V6(Ipv6Addr::from(octets))
    } else {
        IpAddr::V4(Ipv4Addr::from((words.high as u32).to_le_bytes()))
    }
}

/// Decode a hex address field straight to an address
pub(crate) fn hex_to_ip(hex: &str) -> Result<IpAddr> {
    hex_to_words(hex).map(words_to_ip)
}
