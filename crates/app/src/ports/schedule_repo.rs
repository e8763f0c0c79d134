//! Schedule repository port: the device's table of recurring jobs.

use std::future::Future;

use armplug_domain::error::ArmPlugError;
use armplug_domain::id::JobId;
use armplug_domain::schedule::{JobRevision, JobSpec, ScheduledJob};

/// Lists and mutates scheduled jobs on the device.
pub trait ScheduleRepository {
    /// List every job, including those created by other tools.
    ///
    /// Fails with [`ArmPlugError::List`].
    fn list(&self) -> impl Future<Output = Result<Vec<ScheduledJob>, ArmPlugError>> + Send;

    /// Create a job; the device assigns its id.
    ///
    /// Fails with [`ArmPlugError::CreateOrUpdate`].
    fn create(
        &self,
        spec: &JobSpec,
    ) -> impl Future<Output = Result<JobRevision, ArmPlugError>> + Send;

    /// Replace the configuration of an existing job.
    ///
    /// Fails with [`ArmPlugError::CreateOrUpdate`].
    fn update(
        &self,
        id: JobId,
        spec: &JobSpec,
    ) -> impl Future<Output = Result<JobRevision, ArmPlugError>> + Send;
}

impl<T: ScheduleRepository + Send + Sync> ScheduleRepository for std::sync::Arc<T> {
    fn list(&self) -> impl Future<Output = Result<Vec<ScheduledJob>, ArmPlugError>> + Send {
        (**self).list()
    }

    fn create(
        &self,
        spec: &JobSpec,
    ) -> impl Future<Output = Result<JobRevision, ArmPlugError>> + Send {
        (**self).create(spec)
    }

    fn update(
        &self,
        id: JobId,
        spec: &JobSpec,
    ) -> impl Future<Output = Result<JobRevision, ArmPlugError>> + Send {
        (**self).update(id, spec)
    }
}
