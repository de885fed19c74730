//! Per-device outcomes for multi-device operations.

use crate::errors::Error;
use crate::state::LightId;

/// The failure of a single device within a batch.
#[derive(Debug)]
pub struct DeviceFailure {
    pub id: LightId,
    pub error: Error,
}

/// Per-device result set for a bulk or discovery operation.
///
/// No transactional guarantee spans multiple devices: an operation that
/// fails on the third of five lights leaves the first two changed and the
/// last two untouched. The report makes that partial application
/// observable instead of collapsing it into a single boolean.
#[derive(Debug, Default)]
pub struct BatchReport {
    succeeded: Vec<LightId>,
    failures: Vec<DeviceFailure>,
}

impl BatchReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn success(&mut self, id: LightId) {
        self.succeeded.push(id);
    }

    pub(crate) fn failure(&mut self, id: LightId, error: Error) {
        self.failures.push(DeviceFailure { id, error });
    }

    /// Ids the operation completed for, in application order.
    pub fn succeeded(&self) -> &[LightId] {
        &self.succeeded
    }

    pub fn failures(&self) -> &[DeviceFailure] {
        &self.failures
    }

    /// True when every targeted device succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Collapses the report: `Ok(())` when complete, otherwise
    /// [`Error::PartialFailure`] carrying the failed ids and their causes.
    pub fn into_result(self) -> Result<(), Error> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::PartialFailure(self.failures))
        }
    }
}
