//! Machine validators.
//!
//! [`DefaultMachineValidator`] runs an ordered list of assertions and
//! stops at the first failure. The default set checks each machine on its
//! own (addresses, MAC, disk, BMC, VLAN) and then checks that identifying
//! fields are unique across the batch.

pub mod assertions;
mod error;

use std::convert::Infallible;
use std::sync::Arc;

pub use assertions::{Assertion, UniqueFields};
pub use error::ValidationError;

use crate::machine::Machine;
use crate::traits::MachineValidator;

/// Validator built from registered assertions.
pub struct DefaultMachineValidator {
    assertions: Vec<Assertion>,
    unique: Option<Arc<UniqueFields>>,
}

impl DefaultMachineValidator {
    /// A validator with no assertions. Accepts everything until some are registered.
    pub fn new() -> Self {
        Self {
            assertions: Vec::new(),
            unique: None,
        }
    }

    /// Append an assertion. Assertions run in registration order.
    pub fn register<F>(&mut self, assertion: F) -> &mut Self
    where
        F: Fn(&Machine) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.assertions.push(Box::new(assertion));
        self
    }

    /// Add the per-machine assertions.
    pub fn with_static_assertions(mut self) -> Self {
        self.assertions.extend(assertions::static_assertions());
        self
    }

    /// Add batch-wide uniqueness of hostname, IP, MAC and BMC IP.
    pub fn with_uniqueness_assertions(mut self) -> Self {
        let unique = Arc::new(UniqueFields::new());
        let tracker = Arc::clone(&unique);
        self.assertions
            .push(Box::new(move |machine: &Machine| tracker.check(machine)));
        self.unique = Some(unique);
        self
    }

    /// Forget machines seen by the uniqueness assertions, ready for a new batch.
    pub fn reset(&self) {
        if let Some(unique) = &self.unique {
            unique.reset();
        }
    }

    /// Number of registered assertions.
    pub fn len(&self) -> usize {
        self.assertions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assertions.is_empty()
    }
}

impl Default for DefaultMachineValidator {
    fn default() -> Self {
        Self::new()
            .with_static_assertions()
            .with_uniqueness_assertions()
    }
}

impl std::fmt::Debug for DefaultMachineValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DefaultMachineValidator")
            .field("assertions", &self.assertions.len())
            .field("unique", &self.unique.is_some())
            .finish()
    }
}

impl MachineValidator for DefaultMachineValidator {
    type Error = ValidationError;

    fn validate(&self, machine: &Machine) -> Result<(), Self::Error> {
        self.assertions
            .iter()
            .try_for_each(|assertion| assertion(machine))
    }
}

/// Validator that lets every machine through.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl MachineValidator for AcceptAll {
    type Error = Infallible;

    fn validate(&self, _machine: &Machine) -> Result<(), Self::Error> {
        Ok(())
    }
}
