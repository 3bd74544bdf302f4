//! procnet - snapshot reader for the Linux /proc/net connection tables
//!
//! Reads the kernel's textual socket tables (`/proc/net/tcp`, `udp6`, ...)
//! into typed [`Connection`] records and finds the entry owning a given
//! 4-tuple, so a caller can attribute a packet or flow to a user id and
//! socket inode.
//!
//! Every call re-reads the table. Nothing is cached, since a stale
//! snapshot would attribute sockets to the wrong owner.
//!
//! ```no_run
//! use std::net::{IpAddr, Ipv4Addr};
//! use procnet::Protocol;
//!
//! let localhost = IpAddr::V4(Ipv4Addr::LOCALHOST);
//! if let Some(conn) = procnet::find_entry(Protocol::Tcp, localhost, 50000, localhost, 8080) {
//!     println!("owned by uid {} (inode {})", conn.uid, conn.inode);
//! }
//! ```

pub mod config;
pub mod error;
pub mod net;

use std::net::IpAddr;

pub use config::ReaderConfig;
pub use error::{Error, Result};
pub use net::{Connection, Protocol, TableReader};

/// Read every entry of the `protocol` table under /proc/net
pub fn parse(protocol: Protocol) -> Result<Vec<Connection>> {
    TableReader::default().read_table(protocol)
}

/// Find the /proc/net entry carrying this 4-tuple, if any
///
/// Read failures are logged and reported as no match.
pub fn find_entry(
    protocol: Protocol,
    src_ip: IpAddr,
    src_port: u16,
    dst_ip: IpAddr,
    dst_port: u16,
) -> Option<Connection> {
    TableReader::default().find_entry(protocol, src_ip, src_port, dst_ip, dst_port)
}
