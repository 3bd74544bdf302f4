// Network connection table module
// Read-only snapshots of the kernel socket tables under /proc/net

mod decode;
mod lookup;
mod parse;
mod table;

use std::fmt;
use std::net::IpAddr;
use std::str::FromStr;

use crate::error::Error;

pub use decode::{dec_to_int, hex_to_uint, hex_to_words, words_to_ip, HexWords};
pub use parse::{parse_line, RawFields};
pub use table::{parse_table, TableReader};

/// Transport protocols whose /proc/net tables share the tcp column layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Tcp,
    Tcp6,
    Udp,
    Udp6,
    UdpLite,
    UdpLite6,
    Raw,
    Raw6,
}

impl Protocol {
    pub const ALL: [Protocol; 8] = [
        Protocol::Tcp,
        Protocol::Tcp6,
        Protocol::Udp,
        Protocol::Udp6,
        Protocol::UdpLite,
        Protocol::UdpLite6,
        Protocol::Raw,
        Protocol::Raw6,
    ];

    /// Name of the pseudo-file under /proc/net
    pub fn file_name(self) -> &'static str {
        match self {
            Protocol::Tcp => "tcp",
            Protocol::Tcp6 => "tcp6",
            Protocol::Udp => "udp",
            Protocol::Udp6 => "udp6",
            Protocol::UdpLite => "udplite",
            Protocol::UdpLite6 => "udplite6",
            Protocol::Raw => "raw",
            Protocol::Raw6 => "raw6",
        }
    }

    pub fn is_ipv6(self) -> bool {
        matches!(
            self,
            Protocol::Tcp6 | Protocol::Udp6 | Protocol::UdpLite6 | Protocol::Raw6
        )
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

impl FromStr for Protocol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::ALL
            .into_iter()
            .find(|p| p.file_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnsupportedProtocol(s.to_string()))
    }
}

/// One socket entry as seen in a connection table at read time
///
/// The protocol comes from the caller, not from the line. Address width
/// follows the width of the hex field it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub protocol: Protocol,
    pub src_ip: IpAddr,
    pub src_port: u16,
    pub dst_ip: IpAddr,
    pub dst_port: u16,
    pub uid: u32,
    /// 0 for listening or orphaned sockets on some kernels
    pub inode: u64,
}

impl Connection {
    pub fn new(
        protocol: Protocol,
        src_ip: IpAddr,
        src_port: u16,
        dst_ip: IpAddr,
        dst_port: u16,
        uid: u32,
        inode: u64,
    ) -> Self {
        Self {
            protocol,
            src_ip,
            src_port,
            dst_ip,
            dst_port,
            uid,
            inode,
        }
    }

    /// Whether this entry carries the given 4-tuple
    ///
    /// Addresses are compared in canonical form, so `::ffff:10.0.0.1`
    /// matches `10.0.0.1`.
    pub fn matches(&self, src_ip: IpAddr, src_port: u16, dst_ip: IpAddr, dst_port: u16) -> bool {
        self.src_port == src_port
            && self.dst_port == dst_port
            && self.src_ip.to_canonical() == src_ip.to_canonical()
            && self.dst_ip.to_canonical() == dst_ip.to_canonical()
    }

    /// No socket object is associated with this entry
    pub fn is_unassociated(&self) -> bool {
        self.inode == 0
    }

    /// Format connection for display
    pub fn format_display(&self) -> String {
        format!(
            "{}:{} -> {}:{} [{} uid={} inode={}]",
            self.src_ip,
            self.src_port,
            self.dst_ip,
            self.dst_port,
            self.protocol,
            self.uid,
            self.inode
        )
    }
}
