// Line parser for /proc/net/{tcp,udp,raw}[6]
//
// Line format (trailing columns vary by protocol and are ignored):
//   sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
//   0: 0100007F:1F90 00000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 12345 1 ...

use std::sync::OnceLock;

use regex::Regex;

use super::decode::{dec_to_int, hex_to_ip, hex_to_uint};
use super::{Connection, Protocol};
use crate::error::{Error, Result};

const LINE_PATTERN: &str = concat!(
    r"(?i)^[0-9]+:\s+",                     // sl
    r"([0-9a-f]{8,32}):([0-9a-f]{4})\s+",   // local_address
    r"([0-9a-f]{8,32}):([0-9a-f]{4})\s+",   // rem_address
    r"[0-9a-f]{2}\s+",                      // st
    r"[0-9a-f]{8}:[0-9a-f]{8}\s+",          // tx_queue rx_queue
    r"[0-9a-f]{2}:[0-9a-f]{8}\s+",          // tr tm->when
    r"[0-9a-f]{8}\s+",                      // retrnsmt
    r"([0-9]+)\s+",                         // uid
    r"[0-9]+\s+",                           // timeout
    r"([0-9]+)",                            // inode
    r"(?:\s.*)?$",                          // ref, pointer, drops, ...
);

fn line_regex() -> &'static Regex {
    static LINE_RE: OnceLock<Regex> = OnceLock::new();
    LINE_RE.get_or_init(|| Regex::new(LINE_PATTERN).expect("line pattern is valid"))
}

/// The columns of one table line that we keep, still as text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFields<'a> {
    pub local_addr: &'a str,
    pub local_port: &'a str,
    pub remote_addr: &'a str,
    pub remote_port: &'a str,
    pub uid: &'a str,
    pub inode: &'a str,
}

/// Match one trimmed table line, returning None if it has the wrong shape
pub fn parse_line(line: &str) -> Option<RawFields<'_>> {
    let caps = line_regex().captures(line)?;
    let field = |i: usize| caps.get(i).map(|m| m.as_str());

    Some(RawFields {
        local_addr: field(1)?,
        local_port: field(2)?,
        remote_addr: field(3)?,
        remote_port: field(4)?,
        uid: field(5)?,
        inode: field(6)?,
    })
}

impl RawFields<'_> {
    /// Decode the text columns into a Connection for `protocol`
    pub fn decode(&self, protocol: Protocol) -> Result<Connection> {
        let uid = dec_to_int(self.uid)?;
        let inode = dec_to_int(self.inode)?;

        Ok(Connection::new(
            protocol,
            hex_to_ip(self.local_addr)?,
            decode_port(self.local_port)?,
            hex_to_ip(self.remote_addr)?,
            decode_port(self.remote_port)?,
            u32::try_from(uid).map_err(|e| Error::decode("uid", self.uid, e))?,
            u64::try_from(inode).map_err(|e| Error::decode("inode", self.inode, e))?,
        ))
    }
}

fn decode_port(hex: &str) -> Result<u16> {
    let port = hex_to_uint(hex)?;
    u16::try_from(port).map_err(|e| Error::decode("port", hex, e))
}
