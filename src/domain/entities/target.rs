//! Fleet member hosts
//!
//! A `Target` is built once from input configuration and never mutated.

use std::fmt;
use std::path::{Path, PathBuf};

/// Role a host plays in the monitored fleet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Relay that forwards traffic metadata to the management endpoint
    Controller,
    /// Monitored workload host running the local agent
    Production,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Controller => "controller",
            Role::Production => "production",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Login material for the remote shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    private_key: PathBuf,
}

impl Credentials {
    pub fn new(username: impl Into<String>, private_key: impl Into<PathBuf>) -> Self {
        Self {
            username: username.into(),
            private_key: private_key.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Path to the private key handed to `ssh -i`
    pub fn private_key(&self) -> &Path {
        &self.private_key
    }
}

/// A host that receives the registration configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    address: String,
    role: Role,
    credentials: Credentials,
}

impl Target {
    pub fn new(address: impl Into<String>, role: Role, credentials: Credentials) -> Self {
        Self {
            address: address.into(),
            role,
            credentials,
        }
    }

    pub fn controller(address: impl Into<String>, credentials: Credentials) -> Self {
        Self::new(address, Role::Controller, credentials)
    }

    pub fn production(address: impl Into<String>, credentials: Credentials) -> Self {
        Self::new(address, Role::Production, credentials)
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// `user@address` as understood by ssh
    pub fn ssh_destination(&self) -> String {
        format!("{}@{}", self.credentials.username, self.address)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.role, self.address)
    }
}

/// Split a host list on commas and whitespace, dropping blanks.
pub fn parse_address_list(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("azureuser", "/keys/lab.pem")
    }

    #[test]
    fn ssh_destination_joins_user_and_address() {
        let target = Target::production("10.0.1.5", creds());
        assert_eq!(target.ssh_destination(), "azureuser@10.0.1.5");
        assert_eq!(target.credentials().private_key(), Path::new("/keys/lab.pem"));
    }

    #[test]
    fn display_includes_role() {
        let target = Target::controller("10.0.0.4", creds());
        assert_eq!(target.to_string(), "controller 10.0.0.4");
    }

    #[test]
    fn address_list_skips_empty_entries() {
        assert_eq!(
            parse_address_list("10.0.1.5,, 10.0.1.6 ,"),
            vec!["10.0.1.5".to_string(), "10.0.1.6".to_string()]
        );
        assert!(parse_address_list("").is_empty());
    }

    #[test]
    fn address_list_accepts_spaces_between_hosts() {
        assert_eq!(
            parse_address_list("10.0.1.5 10.0.1.6\t10.0.1.7, 10.0.1.8"),
            vec!["10.0.1.5", "10.0.1.6", "10.0.1.7", "10.0.1.8"]
        );
    }
}
