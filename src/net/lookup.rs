// 4-tuple lookup over a fresh table snapshot
//
// Callers use this for best-effort socket ownership, so every failure
// degrades to "not found" with a warning.

use std::net::IpAddr;

use tracing::warn;

use super::table::TableReader;
use super::{Connection, Protocol};

impl TableReader {
    /// Find the first entry of the `protocol` table carrying this 4-tuple
    ///
    /// Returns None when no entry matches or when the table cannot be read.
    pub fn find_entry(
        &self,
        protocol: Protocol,
        src_ip: IpAddr,
        src_port: u16,
        dst_ip: IpAddr,
        dst_port: u16,
    ) -> Option<Connection> {
        let conns = match self.read_table(protocol) {
            Ok(conns) => conns,
            Err(e) => {
                warn!(protocol = %protocol, error = %e, "Error while searching connection table");
                return None;
            }
        };

        conns
            .into_iter()
            .find(|conn| conn.matches(src_ip, src_port, dst_ip, dst_port))
    }
}
