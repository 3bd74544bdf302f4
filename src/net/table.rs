// Connection table scanner
// Read-only: opens one /proc/net table per call, never caches

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, error, warn};

use super::parse::parse_line;
use super::{Connection, Protocol};
use crate::config::ReaderConfig;
use crate::error::{Error, Result};

/// Reads connection tables from a configured /proc/net directory
#[derive(Debug, Clone, Default)]
pub struct TableReader {
    config: ReaderConfig,
}

impl TableReader {
    pub fn new(config: ReaderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    /// Snapshot every entry of the table for `protocol`, in file order
    ///
    /// Fails if the table cannot be opened or read, or if a field passes
    /// the line matcher but cannot be decoded. Malformed lines are skipped.
    pub fn read_table(&self, protocol: Protocol) -> Result<Vec<Connection>> {
        let path = self.config.table_path(protocol);
        let file = File::open(&path).map_err(|source| Error::Io {
            path: path.clone(),
            source,
        })?;

        let conns = parse_table(BufReader::new(file), protocol, &path)?;
        debug!(
            protocol = %protocol,
            count = conns.len(),
            "read_table: Parsed connection table"
        );
        Ok(conns)
    }
}

/// Scan table text from any reader
///
/// The first line is treated as the column header and dropped unchecked.
/// `source` names the table in log messages and I/O errors.
pub fn parse_table<R: BufRead>(
    reader: R,
    protocol: Protocol,
    source: &Path,
) -> Result<Vec<Connection>> {
    let mut conns = Vec::new();

    // Skip header line
    for line in reader.lines().skip(1) {
        let line = line.map_err(|e| Error::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(fields) = parse_line(line) else {
            warn!(file = %source.display(), line = %line, "Could not parse connection table line");
            continue;
        };

        match fields.decode(protocol) {
            Ok(conn) => conns.push(conn),
            Err(e) => {
                error!(file = %source.display(), line = %line, error = %e, "Connection table field failed to decode");
                return Err(e);
            }
        }
    }

    Ok(conns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Cursor;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    const SAMPLE_TCP: &str = "\
  sl  local_address rem_address   st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 0100007F:0539 00000000:0000 0A 00000000:00000000 00:00000000 00000000   108        0 12345 1 0000000000000000 100 0 0 10 0
   1: 00000000:0050 00000000:0000 0A 00000000:00000000 00:00000000 00000000     0        0 67890 1 0000000000000000 100 0 0 10 0
   2: 0100007F:1F90 0A00000A:D904 01 00000000:00000000 00:00000000 00000000  1000        0 11111 1 0000000000000000 100 0 0 10 0
";

    const SAMPLE_TCP6: &str = "\
  sl  local_address                         remote_address                        st tx_queue rx_queue tr tm->when retrnsmt   uid  timeout inode
   0: 00000000000000000000000000000000:1F90 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000  1000        0 22222 1 0000000000000000 100 0 0 10 0
   1: 00000000000000000000000001000000:0539 00000000000000000000000000000000:0000 0A 00000000:00000000 00:00000000 00000000   108        0 33333 1 0000000000000000 100 0 0 10 0
";

    fn scan(text: &str, protocol: Protocol) -> Result<Vec<Connection>> {
        parse_table(Cursor::new(text), protocol, Path::new("fixture"))
    }

    #[test]
    fn test_parse_tcp_table() {
        let conns = scan(SAMPLE_TCP, Protocol::Tcp).unwrap();
        assert_eq!(conns.len(), 3);

        assert_eq!(conns[0].src_ip, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(conns[0].src_port, 1337);
        assert_eq!(conns[0].uid, 108);
        assert_eq!(conns[1].src_port, 80);
        assert_eq!(conns[1].inode, 67890);

        assert_eq!(conns[2].dst_ip, IpAddr::V4(Ipv4Addr::new(10, 0, 0, 10)));
        assert_eq!(conns[2].dst_port, 55556);
        assert!(conns.iter().all(|c| c.protocol == Protocol::Tcp));
    }

    #[test]
    fn test_parse_tcp6_table() {
        let conns = scan(SAMPLE_TCP6, Protocol::Tcp6).unwrap();
        assert_eq!(conns.len(), 2);
        assert_eq!(conns[0].src_ip, IpAddr::V6(Ipv6Addr::UNSPECIFIED));
        assert_eq!(conns[1].src_ip, IpAddr::V6(Ipv6Addr::LOCALHOST));
    }

    #[test]
    fn test_header_only_table_is_empty() {
        let header = SAMPLE_TCP.lines().next().unwrap();
        assert!(scan(header, Protocol::Tcp).unwrap().is_empty());
        assert!(scan("", Protocol::Tcp).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_lines_skipped_in_order() {
        let mut lines: Vec<&str> = SAMPLE_TCP.lines().collect();
        lines.insert(2, "   9: garbage line that does not match");
        lines.insert(4, "   7: 0100007F:0539 0A 00000000:00000000");
        lines.push("");
        let text = lines.join("\n");

        let conns = scan(&text, Protocol::Tcp).unwrap();
        let inodes: Vec<u64> = conns.iter().map(|c| c.inode).collect();
        assert_eq!(inodes, vec![12345, 67890, 11111]);
    }

    #[test]
    fn test_decode_failure_aborts_scan() {
        let text = SAMPLE_TCP.replace("  1000  ", "  99999999999  ");
        let err = scan(&text, Protocol::Tcp).unwrap_err();
        assert!(err.is_internal());
    }

    #[test]
    fn test_read_table_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("tcp"), SAMPLE_TCP).unwrap();
        let reader = TableReader::new(ReaderConfig::new().with_proc_net_dir(dir.path()));

        let conns = reader.read_table(Protocol::Tcp).unwrap();
        assert_eq!(conns.len(), 3);
    }

    #[test]
    fn test_missing_table_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let reader = TableReader::new(ReaderConfig::new().with_proc_net_dir(dir.path()));

        let err = reader.read_table(Protocol::Udp6).unwrap_err();
        match err {
            Error::Io { path, source } => {
                assert_eq!(path, dir.path().join("udp6"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected I/O error, got {other:?}"),
        }
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_read_live_tcp_table() {
        // Smoke test against the running kernel; contents vary
        let result = TableReader::default().read_table(Protocol::Tcp);
        if let Ok(conns) = result {
            println!("Found {} tcp entries", conns.len());
        }
    }
}
