//! Error types for the validator module.

/// Why a machine was rejected.
///
/// Carried to the caller of the loop unchanged, so match on it directly.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("machine {hostname:?}: {field} is required")]
    Missing {
        hostname: String,
        field: &'static str,
    },

    #[error("machine {hostname:?}: invalid {field} {value:?}")]
    InvalidIp {
        hostname: String,
        field: &'static str,
        value: String,
    },

    #[error("machine {hostname:?}: invalid netmask {value:?}")]
    InvalidNetmask { hostname: String, value: String },

    #[error("machine {hostname:?}: invalid mac {value:?}")]
    InvalidMac { hostname: String, value: String },

    #[error("invalid hostname {value:?}: {reason}")]
    InvalidHostname { value: String, reason: String },

    #[error("machine {hostname:?}: disk {value:?} is not a /dev/ path")]
    InvalidDisk { hostname: String, value: String },

    #[error("machine {hostname:?}: invalid label {key:?}: {reason}")]
    InvalidLabel {
        hostname: String,
        key: String,
        reason: String,
    },

    #[error("machine {hostname:?}: bmc_ip, bmc_username and bmc_password must be set together")]
    IncompleteBmc { hostname: String },

    #[error("machine {hostname:?}: vlan_id {value:?} must be between 1 and 4094")]
    InvalidVlan { hostname: String, value: String },

    #[error("machine {hostname:?}: duplicate {field} {value:?}")]
    Duplicate {
        hostname: String,
        field: &'static str,
        value: String,
    },

    /// Raised by assertions registered outside this crate.
    #[error("machine {hostname:?}: {reason}")]
    Other { hostname: String, reason: String },
}
