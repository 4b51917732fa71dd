//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up, and turns
//! merged configuration into a `BringUpPlan`.
//! This is the dependency injection point for the application.

use std::time::Duration;

use crate::application::{
    terraform_steps, BringUpPlan, BringUpSettings, BringUpUseCase, ProvisionUseCase, PushOptions,
    RegistrationPolicy,
};
use crate::config::{Config, FleetConfig};
use crate::domain::entities::{parse_address_list, Credentials, Endpoint, Target};
use crate::error::{FleetError, FleetResult};
use crate::infrastructure::{
    CommandStepRunner, HttpManagementApi, HttpOptions, LoggingDomainRegistry, PingProbe,
    SshOptions, SshShell,
};

/// Remote login user when neither flag nor config names one
pub const DEFAULT_REMOTE_USER: &str = "azureuser";

/// Type alias for the concrete BringUpUseCase with all dependencies
pub type ConcreteBringUpUseCase =
    BringUpUseCase<HttpManagementApi, LoggingDomainRegistry, SshShell, PingProbe>;

/// Type alias for the concrete ProvisionUseCase
pub type ConcreteProvisionUseCase = ProvisionUseCase<CommandStepRunner>;

/// Create a bring-up use case talking to the configured management endpoint
pub fn create_bring_up_use_case(config: &Config) -> FleetResult<ConcreteBringUpUseCase> {
    let fm = require(&config.fleet.fm_ip, "fm-ip")?;

    let api = HttpManagementApi::new(
        fm,
        HttpOptions {
            health_timeout: Duration::from_secs(config.readiness.request_timeout_secs),
            login_timeout: Duration::from_secs(config.auth.request_timeout_secs),
            verify_tls: config.auth.verify_tls,
        },
    )?;

    let shell = SshShell::new(SshOptions {
        connect_timeout: Duration::from_secs(config.push.connect_timeout_secs),
        host_keys: config.ssh.host_key_policy(),
        ..SshOptions::default()
    });

    let probe = PingProbe::new(Duration::from_secs(config.verify.probe_timeout_secs));

    let settings = BringUpSettings {
        push: PushOptions {
            config_path: config.push.config_path.clone(),
            agent_service: config.push.agent_service.clone(),
        },
        push_workers: config.push.concurrency,
        verify_workers: config.verify.concurrency,
    };

    Ok(BringUpUseCase::new(
        api,
        LoggingDomainRegistry,
        shell,
        probe,
        settings,
    ))
}

/// Create a terraform init/plan/apply use case
pub fn create_provision_use_case(program: &str, json: bool) -> ConcreteProvisionUseCase {
    ProvisionUseCase::new(CommandStepRunner::new(json), terraform_steps(program))
}

/// Build the run inputs from merged configuration.
///
/// Fails with `MissingSetting` naming the first absent input.
pub fn build_plan(config: &Config, registration_policy: RegistrationPolicy) -> FleetResult<BringUpPlan> {
    let fleet = &config.fleet;

    let fm = require(&fleet.fm_ip, "fm-ip")?;
    let public_ip = require(&fleet.controller_public_ip, "controller-public-ip")?;
    let key_path = fleet
        .key_path
        .clone()
        .ok_or(FleetError::MissingSetting("key-path"))?;
    let group = require(&fleet.fm_group, "fm-group")?;
    let subgroup = require(&fleet.fm_subgroup, "fm-subgroup")?;
    let password = require(&fleet.fm_password, "fm-password")?;

    let username = fleet
        .username
        .clone()
        .unwrap_or_else(|| DEFAULT_REMOTE_USER.to_string());
    let credentials = Credentials::new(username, key_path);

    let production = production_addresses(fleet)
        .into_iter()
        .map(|address| Target::production(address, credentials.clone()))
        .collect();

    Ok(BringUpPlan {
        controller: Target::controller(public_ip, credentials),
        production,
        verification: build_verification(fleet)?,
        group: group.to_string(),
        subgroup: subgroup.to_string(),
        fm_username: config.auth.username.clone(),
        fm_password: password.to_string(),
        remote_address: remote_host(fm),
        remote_port: config.push.remote_port,
        readiness: config.readiness.retry_policy(),
        registration_policy,
    })
}

/// Endpoints swept after configuration, in report order
pub fn build_verification(fleet: &FleetConfig) -> FleetResult<Vec<Endpoint>> {
    let fm = require(&fleet.fm_ip, "fm-ip")?;
    let controller = require(&fleet.controller_ip, "controller-ip")?;
    let secondary = require(&fleet.secondary_ip, "secondary-ip")?;
    let tool = require(&fleet.tool_ip, "tool-ip")?;

    let mut endpoints = vec![
        Endpoint::new(remote_host(fm), "management endpoint"),
        Endpoint::new(controller, "controller"),
        Endpoint::new(secondary, "secondary appliance"),
        Endpoint::new(tool, "tool host"),
    ];

    for (i, address) in production_addresses(fleet).into_iter().enumerate() {
        endpoints.push(Endpoint::new(address, format!("production host {}", i + 1)));
    }

    Ok(endpoints)
}

/// Host part of an endpoint given as a bare host or a URL
pub fn remote_host(endpoint: &str) -> String {
    let endpoint = endpoint.trim();
    let rest = endpoint
        .split_once("://")
        .map(|(_, rest)| rest)
        .unwrap_or(endpoint);
    let authority = rest.split('/').next().unwrap_or(rest);

    if let Some(bracketed) = authority.strip_prefix('[') {
        // [v6]:port
        return bracketed
            .split(']')
            .next()
            .unwrap_or(bracketed)
            .to_string();
    }

    match authority.rsplit_once(':') {
        Some((host, port))
            if !host.contains(':') && port.chars().all(|c| c.is_ascii_digit()) =>
        {
            host.to_string()
        }
        _ => authority.to_string(),
    }
}

fn production_addresses(fleet: &FleetConfig) -> Vec<String> {
    fleet
        .prod_ips
        .iter()
        .flat_map(|entry| parse_address_list(entry))
        .collect()
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn require<'a>(value: &'a Option<String>, name: &'static str) -> FleetResult<&'a str> {
    present(value).ok_or(FleetError::MissingSetting(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Role;
    use std::path::PathBuf;

    fn lab_config() -> Config {
        let mut config = Config::default();
        config.fleet = FleetConfig {
            fm_ip: Some("10.0.0.1".to_string()),
            controller_ip: Some("10.0.0.4".to_string()),
            controller_public_ip: Some("20.1.2.3".to_string()),
            key_path: Some(PathBuf::from("/keys/lab.pem")),
            fm_group: Some("lab".to_string()),
            fm_subgroup: Some("east".to_string()),
            fm_password: Some("s3cret".to_string()),
            prod_ips: vec!["10.0.1.5,,10.0.1.6".to_string(), " 10.0.1.7 ".to_string()],
            secondary_ip: Some("10.0.0.5".to_string()),
            tool_ip: Some("10.0.0.6".to_string()),
            username: None,
        };
        config
    }

    #[test]
    fn controller_is_pushed_through_public_address() {
        let plan = build_plan(&lab_config(), RegistrationPolicy::Warn).unwrap();
        assert_eq!(plan.controller.address(), "20.1.2.3");
        assert_eq!(plan.controller.role(), Role::Controller);
        assert_eq!(plan.controller.credentials().username(), "azureuser");
        assert_eq!(plan.remote_address, "10.0.0.1");
        assert_eq!(plan.remote_port, 443);
        assert_eq!(plan.fm_username, "admin");
    }

    #[test]
    fn production_list_ignores_blank_entries() {
        let plan = build_plan(&lab_config(), RegistrationPolicy::Warn).unwrap();
        let addresses: Vec<&str> = plan.production.iter().map(|t| t.address()).collect();
        assert_eq!(addresses, ["10.0.1.5", "10.0.1.6", "10.0.1.7"]);
    }

    #[test]
    fn verification_covers_internal_addresses_in_order() {
        let endpoints = build_verification(&lab_config().fleet).unwrap();
        let addresses: Vec<&str> = endpoints.iter().map(|e| e.address.as_str()).collect();
        assert_eq!(
            addresses,
            ["10.0.0.1", "10.0.0.4", "10.0.0.5", "10.0.0.6", "10.0.1.5", "10.0.1.6", "10.0.1.7"]
        );
        assert_eq!(endpoints[2].description, "secondary appliance");
        assert_eq!(endpoints[3].description, "tool host");
        assert_eq!(endpoints[4].description, "production host 1");
    }

    #[test]
    fn verification_endpoints_are_required() {
        let mut fleet = lab_config().fleet;
        fleet.tool_ip = None;
        let err = build_verification(&fleet).unwrap_err();
        assert!(matches!(err, FleetError::MissingSetting("tool-ip")));

        fleet.secondary_ip = Some(String::new());
        let err = build_verification(&fleet).unwrap_err();
        assert!(matches!(err, FleetError::MissingSetting("secondary-ip")));
    }

    #[test]
    fn missing_input_is_named() {
        let mut config = lab_config();
        config.fleet.fm_group = Some("  ".to_string());
        let err = build_plan(&config, RegistrationPolicy::Warn).unwrap_err();
        assert!(matches!(err, FleetError::MissingSetting("fm-group")));
    }

    #[test]
    fn remote_host_strips_scheme_and_port() {
        assert_eq!(remote_host("10.0.0.1"), "10.0.0.1");
        assert_eq!(remote_host("https://fm.lab:8443/ui"), "fm.lab");
        assert_eq!(remote_host("http://127.0.0.1:9000"), "127.0.0.1");
        assert_eq!(remote_host("https://[fd00::1]:443"), "fd00::1");
        assert_eq!(remote_host("fd00::1"), "fd00::1");
    }

    #[test]
    fn use_case_needs_management_endpoint() {
        let err = create_bring_up_use_case(&Config::default()).err().unwrap();
        assert!(matches!(err, FleetError::MissingSetting("fm-ip")));
    }
}
