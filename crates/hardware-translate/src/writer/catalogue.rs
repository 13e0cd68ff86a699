//! In-memory catalogue of written machines.

use std::collections::{BTreeMap, HashMap};
use std::convert::Infallible;

use crate::machine::Machine;
use crate::traits::MachineWriter;

/// Machines indexed by hostname, MAC and IP address.
///
/// Later machines win an index slot on collision; run a uniqueness
/// validator upstream to rule that out.
#[derive(Debug, Default)]
pub struct Catalogue {
    machines: Vec<Machine>,
    by_hostname: HashMap<String, usize>,
    by_mac: HashMap<String, usize>,
    by_ip: HashMap<String, usize>,
}

impl Catalogue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, machine: Machine) {
        let idx = self.machines.len();
        self.by_hostname.insert(machine.hostname.clone(), idx);
        self.by_mac.insert(machine.mac.to_ascii_lowercase(), idx);
        self.by_ip.insert(machine.ip_address.clone(), idx);
        self.machines.push(machine);
    }

    pub fn len(&self) -> usize {
        self.machines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.machines.is_empty()
    }

    /// Machines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Machine> {
        self.machines.iter()
    }

    pub fn by_hostname(&self, hostname: &str) -> Option<&Machine> {
        self.by_hostname.get(hostname).map(|&idx| &self.machines[idx])
    }

    /// MAC lookup is case-insensitive.
    pub fn by_mac(&self, mac: &str) -> Option<&Machine> {
        self.by_mac
            .get(&mac.to_ascii_lowercase())
            .map(|&idx| &self.machines[idx])
    }

    pub fn by_ip(&self, ip: &str) -> Option<&Machine> {
        self.by_ip.get(ip).map(|&idx| &self.machines[idx])
    }

    /// Count machines per value of label `key`. Unlabelled machines are not counted.
    pub fn label_counts(&self, key: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for value in self.machines.iter().filter_map(|m| m.label(key)) {
            *counts.entry(value.to_string()).or_insert(0) += 1;
        }
        counts
    }

    pub fn into_machines(self) -> Vec<Machine> {
        self.machines
    }
}

impl MachineWriter for Catalogue {
    type Error = Infallible;

    fn write(&mut self, machine: Machine) -> Result<(), Self::Error> {
        self.insert(machine);
        Ok(())
    }
}
