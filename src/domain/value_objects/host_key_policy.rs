//! How remote host identities are checked before pushing configuration

use std::path::PathBuf;

/// Host key verification mode for the remote shell
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HostKeyPolicy {
    /// Only accept keys listed in this known_hosts file (provisioning output)
    KnownHosts(PathBuf),
    /// Defer to the operator's own known_hosts, strictly
    #[default]
    System,
    /// Accept whatever key the host presents. Lab-only, requires opt-in.
    TrustOnFirstUse,
}

impl HostKeyPolicy {
    /// Resolve from the allow-list path and the insecure opt-in.
    ///
    /// An explicit allow-list always wins over the insecure flag.
    pub fn resolve(known_hosts: Option<PathBuf>, insecure: bool) -> Self {
        match (known_hosts, insecure) {
            (Some(path), _) => HostKeyPolicy::KnownHosts(path),
            (None, true) => HostKeyPolicy::TrustOnFirstUse,
            (None, false) => HostKeyPolicy::System,
        }
    }

    pub fn is_insecure(&self) -> bool {
        matches!(self, HostKeyPolicy::TrustOnFirstUse)
    }
}
