//! Simulated schedule table.
//!
//! The table assigns job ids and bumps a revision counter on every change.
//! Timespecs are parsed when a job is stored, so an invalid one is rejected
//! up front instead of silently never firing.

use armplug_domain::id::JobId;
use armplug_domain::schedule::{JobCall, ScheduledJob, Timespec};
use armplug_domain::time::LocalTime;

#[derive(Debug, Clone)]
struct StoredJob {
    id: JobId,
    enable: bool,
    timespec: Timespec,
    calls: Vec<JobCall>,
}

impl StoredJob {
    fn to_listed(&self) -> ScheduledJob {
        ScheduledJob {
            id: self.id,
            enable: self.enable,
            timespec: self.timespec.to_string(),
            calls: self.calls.clone(),
        }
    }
}

/// Changes to apply to an existing job; `None` keeps the current value.
#[derive(Debug, Default)]
pub struct JobPatch {
    pub enable: Option<bool>,
    pub timespec: Option<Timespec>,
    pub calls: Option<Vec<JobCall>>,
}

/// Jobs keyed by id, plus the table revision.
#[derive(Debug, Default)]
pub struct ScheduleTable {
    jobs: Vec<StoredJob>,
    next_id: u32,
    rev: u64,
}

impl ScheduleTable {
    #[must_use]
    pub fn rev(&self) -> u64 {
        self.rev
    }

    #[must_use]
    pub fn list(&self) -> Vec<ScheduledJob> {
        self.jobs.iter().map(StoredJob::to_listed).collect()
    }

    /// Store a new job, returning its id and the new revision.
    pub fn create(&mut self, enable: bool, timespec: Timespec, calls: Vec<JobCall>) -> (JobId, u64) {
        self.next_id += 1;
        let id = JobId::new(self.next_id);
        self.jobs.push(StoredJob {
            id,
            enable,
            timespec,
            calls,
        });
        self.rev += 1;
        (id, self.rev)
    }

    /// Apply `patch` to job `id`. Returns the new revision, or `None` if
    /// there is no such job.
    pub fn update(&mut self, id: JobId, patch: JobPatch) -> Option<u64> {
        let job = self.jobs.iter_mut().find(|job| job.id == id)?;
        if let Some(enable) = patch.enable {
            job.enable = enable;
        }
        if let Some(timespec) = patch.timespec {
            job.timespec = timespec;
        }
        if let Some(calls) = patch.calls {
            job.calls = calls;
        }
        self.rev += 1;
        Some(self.rev)
    }

    /// Calls of every enabled job whose timespec matches `at`, in job order.
    #[must_use]
    pub fn due(&self, at: &LocalTime) -> Vec<(JobId, Vec<JobCall>)> {
        self.jobs
            .iter()
            .filter(|job| job.enable && job.timespec.matches(at))
            .map(|job| (job.id, job.calls.clone()))
            .collect()
    }
}
