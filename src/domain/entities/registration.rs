//! Registration payload pushed to every fleet member
//!
//! The rendered document is installed verbatim on each host, so rendering
//! must be byte-exact for a given record.

use crate::error::{FleetError, FleetResult};

/// Port the management endpoint listens on for agent registration
pub const DEFAULT_REMOTE_PORT: u16 = 443;

/// Where the agent reads its registration
pub const DEFAULT_CONFIG_PATH: &str = "/etc/gigamon-cloud.conf";

/// Everything a host needs to join a monitoring domain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    group_name: String,
    subgroup_name: String,
    token: String,
    remote_address: String,
    remote_port: u16,
}

impl RegistrationRecord {
    /// Validate and build a record.
    ///
    /// Every string field must be non-empty and fit on one line, and the
    /// port must be positive.
    pub fn new(
        group_name: impl Into<String>,
        subgroup_name: impl Into<String>,
        token: impl Into<String>,
        remote_address: impl Into<String>,
        remote_port: u16,
    ) -> FleetResult<Self> {
        let record = Self {
            group_name: group_name.into(),
            subgroup_name: subgroup_name.into(),
            token: token.into(),
            remote_address: remote_address.into(),
            remote_port,
        };
        record.validate()?;
        Ok(record)
    }

    fn validate(&self) -> FleetResult<()> {
        for (field, value) in [
            ("group name", &self.group_name),
            ("subgroup name", &self.subgroup_name),
            ("token", &self.token),
            ("remote address", &self.remote_address),
        ] {
            if value.trim().is_empty() {
                return Err(FleetError::InvalidRecord {
                    field,
                    reason: "must not be empty",
                });
            }
            if value.contains(['\n', '\r']) {
                return Err(FleetError::InvalidRecord {
                    field,
                    reason: "must be a single line",
                });
            }
        }
        if self.remote_port == 0 {
            return Err(FleetError::InvalidRecord {
                field: "remote port",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn subgroup_name(&self) -> &str {
        &self.subgroup_name
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn remote_address(&self) -> &str {
        &self.remote_address
    }

    pub fn remote_port(&self) -> u16 {
        self.remote_port
    }

    /// Render the agent configuration document.
    pub fn render(&self) -> String {
        format!(
            "Registration:\n    groupName: {}\n    subGroupName: {}\n    token: {}\n    remoteIP: {}\n    remotePort: {}\n",
            self.group_name, self.subgroup_name, self.token, self.remote_address, self.remote_port
        )
    }
}
