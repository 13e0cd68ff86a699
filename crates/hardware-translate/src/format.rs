//! On-disk formats and the hardware CSV row shape.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ReadError;
use crate::machine::Machine;

/// Separator for list-valued CSV cells (nameservers, labels).
pub const LIST_SEPARATOR: char = '|';

/// Supported input and output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Hardware CSV with a header row
    Csv,
    /// One JSON machine per line
    JsonLines,
}

impl Format {
    /// Infer a format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "csv" => Some(Format::Csv),
            "jsonl" | "ndjson" | "json" => Some(Format::JsonLines),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::JsonLines => "jsonl",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "jsonl" | "ndjson" | "json" => Ok(Format::JsonLines),
            other => Err(format!("unknown format '{other}' (expected csv or jsonl)")),
        }
    }
}

/// One row of a hardware CSV file.
///
/// Column order follows the hardware CSV consumed by Tinkerbell tooling;
/// `vlan_id` is optional and may be absent from the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    pub hostname: String,
    #[serde(default)]
    pub bmc_ip: String,
    #[serde(default)]
    pub bmc_username: String,
    #[serde(default)]
    pub bmc_password: String,
    pub mac: String,
    pub ip_address: String,
    pub netmask: String,
    pub gateway: String,
    pub nameservers: String,
    #[serde(default)]
    pub labels: String,
    pub disk: String,
    #[serde(default)]
    pub vlan_id: String,
}

fn optional(cell: String) -> Option<String> {
    if cell.is_empty() {
        None
    } else {
        Some(cell)
    }
}

fn split_list(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(LIST_SEPARATOR)
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

impl CsvRow {
    /// Decode list and optional cells. `row` is the 1-based data row, used in errors.
    pub fn into_machine(self, row: u64) -> Result<Machine, ReadError> {
        let mut labels = BTreeMap::new();
        for pair in split_list(&self.labels) {
            let (key, value) = pair.split_once('=').ok_or_else(|| ReadError::InvalidField {
                row,
                field: "labels",
                value: pair.to_string(),
                reason: "expected key=value".to_string(),
            })?;
            let key = key.trim();
            if labels.contains_key(key) {
                return Err(ReadError::InvalidField {
                    row,
                    field: "labels",
                    value: pair.to_string(),
                    reason: format!("duplicate key {key:?}"),
                });
            }
            labels.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Machine {
            nameservers: split_list(&self.nameservers).map(str::to_string).collect(),
            labels,
            hostname: self.hostname,
            ip_address: self.ip_address,
            netmask: self.netmask,
            gateway: self.gateway,
            mac: self.mac,
            disk: self.disk,
            bmc_ip: optional(self.bmc_ip),
            bmc_username: optional(self.bmc_username),
            bmc_password: optional(self.bmc_password),
            vlan_id: optional(self.vlan_id),
        })
    }
}

impl From<&Machine> for CsvRow {
    fn from(machine: &Machine) -> Self {
        let sep = LIST_SEPARATOR.to_string();
        Self {
            hostname: machine.hostname.clone(),
            bmc_ip: machine.bmc_ip.clone().unwrap_or_default(),
            bmc_username: machine.bmc_username.clone().unwrap_or_default(),
            bmc_password: machine.bmc_password.clone().unwrap_or_default(),
            mac: machine.mac.clone(),
            ip_address: machine.ip_address.clone(),
            netmask: machine.netmask.clone(),
            gateway: machine.gateway.clone(),
            nameservers: machine.nameservers.join(&sep),
            labels: machine
                .labels
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect::<Vec<_>>()
                .join(&sep),
            disk: machine.disk.clone(),
            vlan_id: machine.vlan_id.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn format_from_path() {
        assert_eq!(Format::from_path(&PathBuf::from("hw.csv")), Some(Format::Csv));
        assert_eq!(Format::from_path(&PathBuf::from("hw.CSV")), Some(Format::Csv));
        assert_eq!(
            Format::from_path(&PathBuf::from("out/hw.ndjson")),
            Some(Format::JsonLines)
        );
        assert_eq!(Format::from_path(&PathBuf::from("hw.yaml")), None);
        assert_eq!(Format::from_path(&PathBuf::from("-")), None);
    }

    #[test]
    fn format_from_str() {
        assert_eq!("jsonl".parse::<Format>(), Ok(Format::JsonLines));
        assert_eq!("CSV".parse::<Format>(), Ok(Format::Csv));
        assert!("xml".parse::<Format>().is_err());
    }

    #[test]
    fn row_decodes_lists_and_optionals() {
        let row = CsvRow {
            hostname: "eksa-cp01".to_string(),
            mac: "00:00:00:00:00:01".to_string(),
            ip_address: "10.0.0.1".to_string(),
            netmask: "255.255.255.0".to_string(),
            gateway: "10.0.0.254".to_string(),
            nameservers: "1.1.1.1| 8.8.8.8".to_string(),
            labels: "type=cp|rack = r1".to_string(),
            disk: "/dev/sda".to_string(),
            ..CsvRow::default()
        };

        let machine = row.into_machine(1).unwrap();
        assert_eq!(machine.nameservers, vec!["1.1.1.1", "8.8.8.8"]);
        assert_eq!(machine.label("type"), Some("cp"));
        assert_eq!(machine.label("rack"), Some("r1"));
        assert_eq!(machine.bmc_ip, None);
        assert_eq!(machine.vlan_id, None);
    }

    #[test]
    fn malformed_label_is_a_read_error() {
        let row = CsvRow {
            labels: "type=cp|orphan".to_string(),
            ..CsvRow::default()
        };
        match row.into_machine(7) {
            Err(ReadError::InvalidField { row, field, value, .. }) => {
                assert_eq!(row, 7);
                assert_eq!(field, "labels");
                assert_eq!(value, "orphan");
            }
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn repeated_label_key_is_a_read_error() {
        let row = CsvRow {
            labels: "type=cp|type=worker".to_string(),
            ..CsvRow::default()
        };
        match row.into_machine(3) {
            Err(err @ ReadError::InvalidField { .. }) => assert_eq!(
                err.to_string(),
                "row 3: invalid labels \"type=worker\": duplicate key \"type\""
            ),
            other => panic!("expected InvalidField, got {other:?}"),
        }
    }

    #[test]
    fn row_from_machine_joins_lists() {
        let machine = Machine {
            nameservers: vec!["1.1.1.1".to_string(), "8.8.8.8".to_string()],
            labels: BTreeMap::from([
                ("rack".to_string(), "r1".to_string()),
                ("type".to_string(), "worker".to_string()),
            ]),
            bmc_ip: Some("10.0.1.1".to_string()),
            ..Machine::default()
        };
        let row = CsvRow::from(&machine);
        assert_eq!(row.nameservers, "1.1.1.1|8.8.8.8");
        assert_eq!(row.labels, "rack=r1|type=worker");
        assert_eq!(row.bmc_ip, "10.0.1.1");
        assert_eq!(row.bmc_password, "");
    }
}
