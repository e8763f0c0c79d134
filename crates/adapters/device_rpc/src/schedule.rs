//! Scheduled jobs on the device.

use serde_json::{Value, json};

use armplug_app::ports::{RpcGateway, ScheduleRepository};
use armplug_domain::error::ArmPlugError;
use armplug_domain::id::JobId;
use armplug_domain::schedule::{JobRevision, JobSpec, ScheduledJob};

use crate::methods::{SCHEDULE_CREATE, SCHEDULE_LIST, SCHEDULE_UPDATE};
use crate::response::{params, typed_field};

/// [`ScheduleRepository`] over the device's `Schedule.*` methods.
pub struct RpcScheduleRepository<G> {
    gateway: G,
}

impl<G> RpcScheduleRepository<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

impl<G: RpcGateway + Send + Sync> ScheduleRepository for RpcScheduleRepository<G> {
    async fn list(&self) -> Result<Vec<ScheduledJob>, ArmPlugError> {
        let mut response = self
            .gateway
            .call(SCHEDULE_LIST, json!({}))
            .await
            .map_err(ArmPlugError::List)?;
        typed_field(SCHEDULE_LIST, &mut response, "jobs").map_err(ArmPlugError::List)
    }

    async fn create(&self, spec: &JobSpec) -> Result<JobRevision, ArmPlugError> {
        let request = params(SCHEDULE_CREATE, spec).map_err(ArmPlugError::CreateOrUpdate)?;
        let mut response = self
            .gateway
            .call(SCHEDULE_CREATE, request)
            .await
            .map_err(ArmPlugError::CreateOrUpdate)?;
        let id: JobId = typed_field(SCHEDULE_CREATE, &mut response, "id")
            .map_err(ArmPlugError::CreateOrUpdate)?;
        let rev: u64 = typed_field(SCHEDULE_CREATE, &mut response, "rev")
            .map_err(ArmPlugError::CreateOrUpdate)?;
        Ok(JobRevision { id, rev })
    }

    async fn update(&self, id: JobId, spec: &JobSpec) -> Result<JobRevision, ArmPlugError> {
        let mut request = params(SCHEDULE_UPDATE, spec).map_err(ArmPlugError::CreateOrUpdate)?;
        if let Value::Object(fields) = &mut request {
            fields.insert("id".to_string(), json!(id));
        }
        let mut response = self
            .gateway
            .call(SCHEDULE_UPDATE, request)
            .await
            .map_err(ArmPlugError::CreateOrUpdate)?;
        let rev: u64 = typed_field(SCHEDULE_UPDATE, &mut response, "rev")
            .map_err(ArmPlugError::CreateOrUpdate)?;
        Ok(JobRevision { id, rev })
    }
}
