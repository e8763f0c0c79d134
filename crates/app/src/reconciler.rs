//! Schedule reconciler: keeps exactly one tagged fire job on the device.
//!
//! Reconciliation lists every job, looks for the one carrying our
//! provenance tag and either updates it in place or creates it. Running it
//! any number of times converges to a single tagged job.

use tracing::{info, warn};

use armplug_domain::config::ControllerConfig;
use armplug_domain::error::ArmPlugError;
use armplug_domain::schedule::{JobRevision, JobSpec, find_owned};

use crate::ports::ScheduleRepository;

/// What a successful reconciliation did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Created(JobRevision),
    Updated(JobRevision),
}

impl ReconcileOutcome {
    #[must_use]
    pub fn revision(self) -> JobRevision {
        match self {
            Self::Created(rev) | Self::Updated(rev) => rev,
        }
    }
}

/// Update-or-create of the fire job.
pub struct ScheduleReconciler<R> {
    repo: R,
    origin: String,
    desired: JobSpec,
}

impl<R: ScheduleRepository> ScheduleReconciler<R> {
    /// Create a reconciler that maintains `desired`, tagged with `origin`.
    pub fn new(repo: R, origin: impl Into<String>, desired: JobSpec) -> Self {
        Self {
            repo,
            origin: origin.into(),
            desired,
        }
    }

    /// Create a reconciler for the fire job described by `config`.
    pub fn from_config(repo: R, config: &ControllerConfig) -> Self {
        Self::new(repo, config.origin.clone(), config.fire_job())
    }

    /// Run one reconciliation pass.
    ///
    /// # Errors
    ///
    /// Returns [`ArmPlugError::List`] when the job table cannot be listed
    /// (nothing is created in that case) and [`ArmPlugError::CreateOrUpdate`]
    /// when the write fails. Neither is retried.
    #[tracing::instrument(skip(self), fields(origin = %self.origin))]
    pub async fn reconcile(&self) -> Result<ReconcileOutcome, ArmPlugError> {
        let jobs = self.repo.list().await.inspect_err(|err| {
            warn!(
                error = %err,
                code = ?err.rpc().and_then(|rpc| rpc.code()),
                "unable to list scheduled jobs"
            );
        })?;

        let outcome = match find_owned(&jobs, &self.origin) {
            Some(job) => {
                let revision = self
                    .repo
                    .update(job.id, &self.desired)
                    .await
                    .inspect_err(|err| log_write_failure(err, "update"))?;
                ReconcileOutcome::Updated(revision)
            }
            None => {
                let revision = self
                    .repo
                    .create(&self.desired)
                    .await
                    .inspect_err(|err| log_write_failure(err, "create"))?;
                ReconcileOutcome::Created(revision)
            }
        };

        let revision = outcome.revision();
        info!(
            job_id = %revision.id,
            rev = revision.rev,
            created = matches!(outcome, ReconcileOutcome::Created(_)),
            "fire job reconciled"
        );
        Ok(outcome)
    }
}

fn log_write_failure(err: &ArmPlugError, action: &str) {
    let rpc = err.rpc();
    warn!(
        action,
        method = rpc.map(|rpc| rpc.method()),
        code = ?rpc.and_then(|rpc| rpc.code()),
        error = %err,
        "unable to write the fire job"
    );
}
