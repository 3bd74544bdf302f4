// Reader configuration
//
// The only knob is where the kernel connection tables live. Containers that
// bind-mount the host /proc elsewhere, and tests using fixture directories,
// point this at a different directory.

use std::path::{Path, PathBuf};

use crate::net::Protocol;

// ============================================================================
// Constants
// ============================================================================

/// Default directory holding the kernel connection tables
pub const DEFAULT_PROC_NET_DIR: &str = "/proc/net";

// ============================================================================
// Configuration Structs
// ============================================================================

/// Configuration for [`TableReader`](crate::net::TableReader)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Directory containing `tcp`, `udp6`, ... pseudo-files
    pub proc_net_dir: PathBuf,
}

impl ReaderConfig {
    /// Create a ReaderConfig pointing at the live kernel tables
    pub fn new() -> Self {
        Self {
            proc_net_dir: PathBuf::from(DEFAULT_PROC_NET_DIR),
        }
    }

    /// Read tables from `dir` instead of /proc/net
    pub fn with_proc_net_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.proc_net_dir = dir.into();
        self
    }

    /// Path of the table file for `protocol`
    pub fn table_path(&self, protocol: Protocol) -> PathBuf {
        self.proc_net_dir.join(protocol.file_name())
    }

    pub fn proc_net_dir(&self) -> &Path {
        &self.proc_net_dir
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_proc_net() {
        let config = ReaderConfig::default();
        assert_eq!(config.proc_net_dir(), Path::new("/proc/net"));
        assert_eq!(
            config.table_path(Protocol::Tcp6),
            PathBuf::from("/proc/net/tcp6")
        );
    }

    #[test]
    fn test_custom_dir() {
        let config = ReaderConfig::new().with_proc_net_dir("/host/proc/net");
        assert_eq!(
            config.table_path(Protocol::Udp),
            PathBuf::from("/host/proc/net/udp")
        );
    }
}
