//! Built-in machine assertions.

use std::collections::{HashMap, HashSet};
use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Mutex, OnceLock};

use regex::Regex;

use super::error::ValidationError;
use crate::machine::Machine;

/// A single check applied to a machine.
pub type Assertion = Box<dyn Fn(&Machine) -> Result<(), ValidationError> + Send + Sync>;

const MAX_HOSTNAME_LEN: usize = 253;
const MAX_VLAN_ID: u16 = 4094;

fn hostname_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
            .expect("hostname pattern is valid")
    })
}

fn mac_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$").expect("mac pattern is valid")
    })
}

/// Assertions that look at one machine in isolation, in evaluation order.
pub fn static_assertions() -> Vec<Assertion> {
    let checks: [fn(&Machine) -> Result<(), ValidationError>; 10] = [
        assert_hostname,
        assert_ip_address,
        assert_netmask,
        assert_gateway,
        assert_nameservers,
        assert_mac,
        assert_disk,
        assert_labels,
        assert_bmc,
        assert_vlan,
    ];
    checks
        .into_iter()
        .map(|check| Box::new(check) as Assertion)
        .collect()
}

fn missing(machine: &Machine, field: &'static str) -> ValidationError {
    ValidationError::Missing {
        hostname: machine.hostname.clone(),
        field,
    }
}

fn check_ip(machine: &Machine, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(missing(machine, field));
    }
    value
        .parse::<IpAddr>()
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidIp {
            hostname: machine.hostname.clone(),
            field,
            value: value.to_string(),
        })
}

pub fn assert_hostname(machine: &Machine) -> Result<(), ValidationError> {
    let hostname = &machine.hostname;
    if hostname.is_empty() {
        return Err(missing(machine, "hostname"));
    }
    if hostname.len() > MAX_HOSTNAME_LEN {
        return Err(ValidationError::InvalidHostname {
            value: hostname.clone(),
            reason: format!("longer than {MAX_HOSTNAME_LEN} characters"),
        });
    }
    if !hostname_regex().is_match(hostname) {
        return Err(ValidationError::InvalidHostname {
            value: hostname.clone(),
            reason: "must be lowercase alphanumeric or '-', separated by '.'".to_string(),
        });
    }
    if hostname.split('.').any(|label| label.len() > 63) {
        return Err(ValidationError::InvalidHostname {
            value: hostname.clone(),
            reason: "label longer than 63 characters".to_string(),
        });
    }
    Ok(())
}

pub fn assert_ip_address(machine: &Machine) -> Result<(), ValidationError> {
    check_ip(machine, "ip_address", &machine.ip_address)
}

pub fn assert_gateway(machine: &Machine) -> Result<(), ValidationError> {
    check_ip(machine, "gateway", &machine.gateway)
}

/// Netmask must be a dotted IPv4 mask with contiguous leading ones.
pub fn assert_netmask(machine: &Machine) -> Result<(), ValidationError> {
    if machine.netmask.is_empty() {
        return Err(missing(machine, "netmask"));
    }
    let invalid = || ValidationError::InvalidNetmask {
        hostname: machine.hostname.clone(),
        value: machine.netmask.clone(),
    };
    let bits = u32::from(machine.netmask.parse::<Ipv4Addr>().map_err(|_| invalid())?);
    if bits == 0 || bits.leading_ones() + bits.trailing_zeros() != 32 {
        return Err(invalid());
    }
    Ok(())
}

pub fn assert_nameservers(machine: &Machine) -> Result<(), ValidationError> {
    if machine.nameservers.is_empty() || machine.nameservers.iter().any(|ns| ns.is_empty()) {
        return Err(missing(machine, "nameservers"));
    }
    Ok(())
}

pub fn assert_mac(machine: &Machine) -> Result<(), ValidationError> {
    if machine.mac.is_empty() {
        return Err(missing(machine, "mac"));
    }
    if !mac_regex().is_match(&machine.mac) {
        return Err(ValidationError::InvalidMac {
            hostname: machine.hostname.clone(),
            value: machine.mac.clone(),
        });
    }
    Ok(())
}

pub fn assert_disk(machine: &Machine) -> Result<(), ValidationError> {
    if machine.disk.is_empty() {
        return Err(missing(machine, "disk"));
    }
    match machine.disk.strip_prefix("/dev/") {
        Some(device) if !device.is_empty() => Ok(()),
        _ => Err(ValidationError::InvalidDisk {
            hostname: machine.hostname.clone(),
            value: machine.disk.clone(),
        }),
    }
}

/// Label keys must be non-empty and neither keys nor values may contain the
/// CSV list separators `=` and `|`.
pub fn assert_labels(machine: &Machine) -> Result<(), ValidationError> {
    for (key, value) in &machine.labels {
        let reason = if key.is_empty() {
            Some("key is empty")
        } else if key.contains(['=', '|']) || value.contains(['=', '|']) {
            Some("contains '=' or '|'")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(ValidationError::InvalidLabel {
                hostname: machine.hostname.clone(),
                key: key.clone(),
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}

pub fn assert_bmc(machine: &Machine) -> Result<(), ValidationError> {
    if !machine.has_bmc() {
        return Ok(());
    }
    let set = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
    if !(set(&machine.bmc_ip) && set(&machine.bmc_username) && set(&machine.bmc_password)) {
        return Err(ValidationError::IncompleteBmc {
            hostname: machine.hostname.clone(),
        });
    }
    check_ip(machine, "bmc_ip", machine.bmc_ip.as_deref().unwrap_or_default())
}

pub fn assert_vlan(machine: &Machine) -> Result<(), ValidationError> {
    let Some(vlan) = &machine.vlan_id else {
        return Ok(());
    };
    match vlan.parse::<u16>() {
        Ok(id) if (1..=MAX_VLAN_ID).contains(&id) => Ok(()),
        _ => Err(ValidationError::InvalidVlan {
            hostname: machine.hostname.clone(),
            value: vlan.clone(),
        }),
    }
}

// ---------------------------------------------------------------------------
// Uniqueness across a batch
// ---------------------------------------------------------------------------

/// Remembers identifying fields of every machine it has accepted.
///
/// A machine is only recorded once all of its fields are unique, so a
/// rejected machine does not poison later ones.
#[derive(Debug, Default)]
pub struct UniqueFields {
    seen: Mutex<HashMap<&'static str, HashSet<String>>>,
}

impl UniqueFields {
    pub fn new() -> Self {
        Self::default()
    }

    fn keys(machine: &Machine) -> Vec<(&'static str, String)> {
        let mut keys = vec![
            ("hostname", machine.hostname.clone()),
            ("ip_address", machine.ip_address.clone()),
            ("mac", machine.mac.to_ascii_lowercase()),
        ];
        if let Some(bmc_ip) = &machine.bmc_ip {
            keys.push(("bmc_ip", bmc_ip.clone()));
        }
        keys
    }

    pub fn check(&self, machine: &Machine) -> Result<(), ValidationError> {
        let mut seen = self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let keys = Self::keys(machine);

        for &(field, ref value) in &keys {
            if seen.get(field).is_some_and(|values| values.contains(value)) {
                return Err(ValidationError::Duplicate {
                    hostname: machine.hostname.clone(),
                    field,
                    value: value.clone(),
                });
            }
        }
        for (field, value) in keys {
            seen.entry(field).or_default().insert(value);
        }
        Ok(())
    }

    /// Forget every machine seen so far.
    pub fn reset(&self) {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}
