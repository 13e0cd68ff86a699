//! The hardware inventory record moved through the translation loop.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One physical machine from a hardware inventory.
///
/// Field values are kept exactly as the source provided them. Readers only
/// decode the wire shape; checking that an address parses is the
/// validator's job.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    pub hostname: String,
    pub ip_address: String,
    pub netmask: String,
    pub gateway: String,
    #[serde(default)]
    pub nameservers: Vec<String>,
    pub mac: String,
    pub disk: String,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmc_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmc_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmc_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan_id: Option<String>,
}

impl Machine {
    /// Whether any BMC field is set.
    pub fn has_bmc(&self) -> bool {
        self.bmc_ip.is_some() || self.bmc_username.is_some() || self.bmc_password.is_some()
    }

    /// Look up a label value by key.
    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }
}

// Hand-written so BMC credentials never reach the logs.
impl fmt::Debug for Machine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("hostname", &self.hostname)
            .field("ip_address", &self.ip_address)
            .field("netmask", &self.netmask)
            .field("gateway", &self.gateway)
            .field("nameservers", &self.nameservers)
            .field("mac", &self.mac)
            .field("disk", &self.disk)
            .field("labels", &self.labels)
            .field("bmc_ip", &self.bmc_ip)
            .field("bmc_username", &self.bmc_username)
            .field("bmc_password", &self.bmc_password.as_ref().map(|_| "<redacted>"))
            .field("vlan_id", &self.vlan_id)
            .finish()
    }
}
