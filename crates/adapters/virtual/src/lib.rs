//! # armplug-adapter-virtual
//!
//! Simulated device host, so the controller and its tests run without a
//! physical plug.
//!
//! ## Provided methods
//!
//! | Method | Behaviour |
//! |--------|-----------|
//! | `Boolean.GetStatus` / `Boolean.Set` | Read / write a virtual boolean |
//! | `Button.GetConfig` / `Boolean.GetConfig` | Component config, error `-105` when missing |
//! | `Button.SetConfig` / `Boolean.SetConfig` | Replace a component config |
//! | `Virtual.Add` | Add a virtual button or boolean, error `-106` when taken |
//! | `Switch.Set` / `Switch.GetStatus` | Drive / read a switched output |
//! | `Schedule.List` / `Schedule.Create` / `Schedule.Update` | Schedule table with revision counter |
//! | `Button.Trigger` | Publish a button event on the event feed |
//!
//! Method names are matched case-insensitively, as scheduled job calls use
//! lowercase names. [`VirtualDevice::run_scheduler`] executes due jobs
//! once per matching second.
//!
//! ## Dependency rule
//!
//! Depends on `armplug-app` (port traits) and `armplug-domain` only.

mod devices;
pub mod rpc;
mod schedule;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::Timelike;
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use armplug_app::ports::{Clock, EventPublisher, RpcGateway};
use armplug_domain::component::{ComponentConfig, ComponentKind, VirtualComponent};
use armplug_domain::error::RpcFailure;
use armplug_domain::event::InboundEvent;
use armplug_domain::id::{BooleanId, ButtonId, JobId, SwitchId};
use armplug_domain::schedule::{JobCall, ScheduledJob, Timespec};
use armplug_domain::time::LocalTime;

use devices::Components;
use rpc::{ALREADY_EXISTS, INVALID_ARGUMENT, METHOD_NOT_FOUND, UNAVAILABLE, decode, not_found};
use schedule::{JobPatch, ScheduleTable};

/// How an injected fault makes a method fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// Answer with a device error.
    Remote { code: i64, message: String },
    /// Drop the completion without answering.
    Dropped,
}

#[derive(Debug, Default)]
struct DeviceState {
    components: Components,
    schedule: ScheduleTable,
}

enum Reply {
    Value(Value),
    Press(InboundEvent),
}

#[derive(Deserialize)]
struct IdParams {
    id: u32,
}

#[derive(Deserialize)]
struct BooleanSetParams {
    id: u32,
    value: bool,
}

#[derive(Deserialize)]
struct SetConfigParams {
    id: u32,
    config: ComponentConfig,
}

#[derive(Deserialize)]
struct SwitchSetParams {
    id: u32,
    on: bool,
}

#[derive(Deserialize)]
struct TriggerParams {
    id: u32,
    event: String,
}

#[derive(Deserialize)]
struct CreateJobParams {
    #[serde(default = "enabled")]
    enable: bool,
    timespec: String,
    #[serde(default)]
    calls: Vec<JobCall>,
}

#[derive(Deserialize)]
struct UpdateJobParams {
    id: JobId,
    enable: Option<bool>,
    timespec: Option<String>,
    calls: Option<Vec<JobCall>>,
}

fn enabled() -> bool {
    true
}

/// An in-memory device answering RPC calls and emitting button events.
pub struct VirtualDevice<P> {
    state: Mutex<DeviceState>,
    faults: Mutex<HashMap<String, Fault>>,
    publisher: P,
}

impl<P> VirtualDevice<P> {
    /// A device with a single switched output, `switch:0`.
    pub fn new(publisher: P) -> Self {
        Self::with_switches(publisher, [SwitchId::new(0)])
    }

    /// A device with the given switched outputs and no virtual components.
    pub fn with_switches(publisher: P, switches: impl IntoIterator<Item = SwitchId>) -> Self {
        let mut state = DeviceState::default();
        for id in switches {
            state.components.install_switch(id.get());
        }
        Self {
            state: Mutex::new(state),
            faults: Mutex::default(),
            publisher,
        }
    }

    /// Make every call to `method` fail until [`clear_fault`](Self::clear_fault).
    pub fn inject_fault(&self, method: &str, fault: Fault) {
        self.lock_faults().insert(method.to_ascii_lowercase(), fault);
    }

    pub fn clear_fault(&self, method: &str) {
        self.lock_faults().remove(&method.to_ascii_lowercase());
    }

    /// Current value of `boolean:<id>`, if it exists.
    #[must_use]
    pub fn boolean_value(&self, id: BooleanId) -> Option<bool> {
        self.lock().components.boolean(id.get()).map(|b| b.value())
    }

    /// Current output of `switch:<id>`, if it exists.
    #[must_use]
    pub fn switch_output(&self, id: SwitchId) -> Option<bool> {
        self.lock().components.switch(id.get()).map(|s| s.output())
    }

    /// Configuration of a virtual component, if it exists.
    #[must_use]
    pub fn component_config(&self, kind: ComponentKind, id: u32) -> Option<ComponentConfig> {
        self.lock().components.config(kind, id).cloned()
    }

    /// Every scheduled job, in creation order.
    #[must_use]
    pub fn jobs(&self) -> Vec<ScheduledJob> {
        self.lock().schedule.list()
    }

    fn lock(&self) -> MutexGuard<'_, DeviceState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_faults(&self) -> MutexGuard<'_, HashMap<String, Fault>> {
        self.faults.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fault(&self, method: &str) -> Option<RpcFailure> {
        let fault = self.lock_faults().get(&method.to_ascii_lowercase()).cloned()?;
        Some(match fault {
            Fault::Remote { code, message } => RpcFailure::remote(method, code, message),
            Fault::Dropped => RpcFailure::Dropped {
                method: method.to_string(),
            },
        })
    }

    fn handle(&self, method: &str, params: Value) -> Result<Reply, RpcFailure> {
        let normalized = method.to_ascii_lowercase();
        let Some((namespace, operation)) = normalized.split_once('.') else {
            return Err(unknown_method(method));
        };
        let mut state = self.lock();
        let value = match (namespace, operation) {
            ("boolean", "getstatus" | "set") => state.boolean_rpc(method, operation, params)?,
            ("button" | "boolean", "getconfig" | "setconfig") => {
                let kind = if namespace == "button" {
                    ComponentKind::Button
                } else {
                    ComponentKind::Boolean
                };
                state.config_rpc(method, kind, operation, params)?
            }
            ("virtual", "add") => state.add_rpc(method, params)?,
            ("switch", "set" | "getstatus") => state.switch_rpc(method, operation, params)?,
            ("schedule", "list" | "create" | "update") => {
                state.schedule_rpc(method, operation, params)?
            }
            ("button", "trigger") => {
                let TriggerParams { id, event } = decode(method, params)?;
                if !state.components.has_button(id) {
                    return Err(not_found(method, &ButtonId::new(id).component_key()));
                }
                return Ok(Reply::Press(InboundEvent::button_push(
                    ButtonId::new(id),
                    event,
                )));
            }
            _ => return Err(unknown_method(method)),
        };
        Ok(Reply::Value(value))
    }
}

fn unknown_method(method: &str) -> RpcFailure {
    RpcFailure::remote(method, METHOD_NOT_FOUND, format!("No handler for {method}"))
}

impl DeviceState {
    fn boolean_rpc(
        &mut self,
        method: &str,
        operation: &str,
        params: Value,
    ) -> Result<Value, RpcFailure> {
        if operation == "set" {
            let BooleanSetParams { id, value } = decode(method, params)?;
            let boolean = self
                .components
                .boolean_mut(id)
                .ok_or_else(|| not_found(method, &BooleanId::new(id).component_key()))?;
            boolean.set(value);
            return Ok(json!({}));
        }
        let IdParams { id } = decode(method, params)?;
        let boolean = self
            .components
            .boolean(id)
            .ok_or_else(|| not_found(method, &BooleanId::new(id).component_key()))?;
        Ok(json!({ "id": id, "value": boolean.value() }))
    }

    fn config_rpc(
        &mut self,
        method: &str,
        kind: ComponentKind,
        operation: &str,
        params: Value,
    ) -> Result<Value, RpcFailure> {
        let key = |id: u32| format!("{kind}:{id}");
        if operation == "setconfig" {
            let SetConfigParams { id, config } = decode(method, params)?;
            if !self.components.set_config(kind, id, config) {
                return Err(not_found(method, &key(id)));
            }
            return Ok(json!({ "restart_required": false }));
        }
        let IdParams { id } = decode(method, params)?;
        let config = self
            .components
            .config(kind, id)
            .ok_or_else(|| not_found(method, &key(id)))?;
        let mut value = serde_json::to_value(config)
            .map_err(|err| RpcFailure::remote(method, UNAVAILABLE, err.to_string()))?;
        if let Value::Object(fields) = &mut value {
            fields.insert("id".to_string(), json!(id));
        }
        Ok(value)
    }

    fn add_rpc(&mut self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        let component: VirtualComponent = decode(method, params)?;
        let (id, key) = (component.id, component.key());
        if !self.components.add(component) {
            return Err(RpcFailure::remote(
                method,
                ALREADY_EXISTS,
                format!("Component {key} already exists!"),
            ));
        }
        Ok(json!({ "id": id }))
    }

    fn switch_rpc(
        &mut self,
        method: &str,
        operation: &str,
        params: Value,
    ) -> Result<Value, RpcFailure> {
        if operation == "set" {
            let SwitchSetParams { id, on } = decode(method, params)?;
            let switch = self
                .components
                .switch_mut(id)
                .ok_or_else(|| not_found(method, &SwitchId::new(id).component_key()))?;
            let was_on = switch.set(on);
            return Ok(json!({ "was_on": was_on }));
        }
        let IdParams { id } = decode(method, params)?;
        let switch = self
            .components
            .switch(id)
            .ok_or_else(|| not_found(method, &SwitchId::new(id).component_key()))?;
        Ok(json!({ "id": id, "output": switch.output() }))
    }

    fn schedule_rpc(
        &mut self,
        method: &str,
        operation: &str,
        params: Value,
    ) -> Result<Value, RpcFailure> {
        match operation {
            "create" => {
                let CreateJobParams {
                    enable,
                    timespec,
                    calls,
                } = decode(method, params)?;
                let timespec = parse_timespec(method, &timespec)?;
                let (id, rev) = self.schedule.create(enable, timespec, calls);
                debug!(job_id = %id, rev, "job created");
                Ok(json!({ "id": id, "rev": rev }))
            }
            "update" => {
                let UpdateJobParams {
                    id,
                    enable,
                    timespec,
                    calls,
                } = decode(method, params)?;
                let timespec = timespec
                    .map(|spec| parse_timespec(method, &spec))
                    .transpose()?;
                let patch = JobPatch {
                    enable,
                    timespec,
                    calls,
                };
                let rev = self
                    .schedule
                    .update(id, patch)
                    .ok_or_else(|| not_found(method, &format!("job {id}")))?;
                debug!(job_id = %id, rev, "job updated");
                Ok(json!({ "rev": rev }))
            }
            _ => Ok(json!({ "jobs": self.schedule.list(), "rev": self.schedule.rev() })),
        }
    }
}

fn parse_timespec(method: &str, spec: &str) -> Result<Timespec, RpcFailure> {
    Timespec::parse(spec).map_err(|err| RpcFailure::remote(method, INVALID_ARGUMENT, err.to_string()))
}

impl<P: EventPublisher + Send + Sync> RpcGateway for VirtualDevice<P> {
    async fn call(&self, method: &str, params: Value) -> Result<Value, RpcFailure> {
        if let Some(failure) = self.fault(method) {
            return Err(failure);
        }
        match self.handle(method, params)? {
            Reply::Value(value) => Ok(value),
            Reply::Press(event) => {
                self.publisher
                    .publish(event)
                    .await
                    .map_err(|err| RpcFailure::remote(method, UNAVAILABLE, err.to_string()))?;
                Ok(Value::Null)
            }
        }
    }
}

impl<P: EventPublisher + Send + Sync> VirtualDevice<P> {
    /// Run every job due at `at`. Returns how many jobs ran.
    ///
    /// A failing call is logged and does not stop the remaining calls.
    pub async fn tick(&self, at: &LocalTime) -> usize {
        let due = self.lock().schedule.due(at);
        for (job_id, calls) in &due {
            for call in calls {
                match self.call(&call.method, call.params.clone()).await {
                    Ok(_) => debug!(%job_id, method = %call.method, "scheduled call executed"),
                    Err(err) => {
                        warn!(%job_id, method = %call.method, error = %err, "scheduled call failed");
                    }
                }
            }
        }
        due.len()
    }

    /// Drive the schedule table from `clock`, forever.
    ///
    /// Each wall-clock second is evaluated at most once.
    pub async fn run_scheduler<C: Clock>(&self, clock: C) {
        let mut interval = tokio::time::interval(Duration::from_millis(250));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_second = None;
        loop {
            interval.tick().await;
            let now = clock.now();
            let second = now.with_nanosecond(0).unwrap_or(now);
            if last_second == Some(second) {
                continue;
            }
            last_second = Some(second);
            self.tick(&second).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armplug_app::event_bus::{EventFeed, InProcessEventBus};
    use armplug_domain::config::ControllerConfig;
    use armplug_domain::event::TRIPLE_PUSH;
    use chrono::NaiveDate;

    fn device() -> VirtualDevice<InProcessEventBus> {
        let (bus, _) = InProcessEventBus::channel(16);
        VirtualDevice::new(bus)
    }

    fn provisioned_with_feed() -> (VirtualDevice<InProcessEventBus>, EventFeed) {
        let (bus, feed) = InProcessEventBus::channel(16);
        let device = VirtualDevice::new(bus);
        {
            let mut state = device.lock();
            for component in ControllerConfig::default().trigger_components() {
                state.components.add(component);
            }
        }
        (device, feed)
    }

    fn provisioned() -> VirtualDevice<InProcessEventBus> {
        provisioned_with_feed().0
    }

    fn wednesday(hour: u32, second: u32) -> LocalTime {
        NaiveDate::from_ymd_opt(2025, 1, 8)
            .unwrap()
            .and_hms_opt(hour, 0, second)
            .unwrap()
    }

    // ── Components ─────────────────────────────────────────────────

    #[tokio::test]
    async fn should_report_missing_component_with_not_found_code() {
        let err = device()
            .call("Boolean.GetConfig", json!({"id": 200}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(rpc::NOT_FOUND));
    }

    #[tokio::test]
    async fn should_add_boolean_and_start_at_default_value() {
        let device = device();
        let component = VirtualComponent::trigger_boolean(BooleanId::new(200), "timer-armed-boolean");

        let reply = device
            .call("Virtual.Add", serde_json::to_value(&component).unwrap())
            .await
            .unwrap();

        assert_eq!(reply, json!({"id": 200}));
        assert_eq!(device.boolean_value(BooleanId::new(200)), Some(false));
        let config = device
            .call("Boolean.GetConfig", json!({"id": 200}))
            .await
            .unwrap();
        assert_eq!(config["name"], "timer-armed-boolean");
        assert_eq!(config["id"], 200);
    }

    #[tokio::test]
    async fn should_refuse_adding_an_existing_component() {
        let device = provisioned();
        let component = VirtualComponent::trigger_button(ButtonId::new(200), "other");
        let err = device
            .call("Virtual.Add", serde_json::to_value(&component).unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(rpc::ALREADY_EXISTS));
    }

    #[tokio::test]
    async fn should_replace_config_on_set_config() {
        let device = provisioned();
        let component = VirtualComponent::trigger_button(ButtonId::new(200), "renamed");

        device
            .call(
                "Button.SetConfig",
                json!({"id": 200, "config": component.config}),
            )
            .await
            .unwrap();

        assert_eq!(
            device
                .component_config(ComponentKind::Button, 200)
                .unwrap()
                .name,
            "renamed"
        );
    }

    // ── Boolean & switch ───────────────────────────────────────────

    #[tokio::test]
    async fn should_write_and_read_boolean_value() {
        let device = provisioned();
        device
            .call("Boolean.Set", json!({"id": 200, "value": true}))
            .await
            .unwrap();
        let status = device
            .call("boolean.getstatus", json!({"id": 200}))
            .await
            .unwrap();
        assert_eq!(status["value"], true);
    }

    #[tokio::test]
    async fn should_reject_non_boolean_value() {
        let device = provisioned();
        let err = device
            .call("Boolean.Set", json!({"id": 200, "value": "on"}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(INVALID_ARGUMENT));
    }

    #[tokio::test]
    async fn should_switch_output_and_report_previous_state() {
        let device = device();
        let reply = device
            .call("Switch.Set", json!({"id": 0, "on": true}))
            .await
            .unwrap();
        assert_eq!(reply, json!({"was_on": false}));
        assert_eq!(device.switch_output(SwitchId::new(0)), Some(true));
    }

    #[tokio::test]
    async fn should_not_know_uninstalled_switch() {
        let err = device()
            .call("Switch.Set", json!({"id": 1, "on": true}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(rpc::NOT_FOUND));
    }

    // ── Schedule ───────────────────────────────────────────────────

    #[tokio::test]
    async fn should_create_list_and_update_jobs() {
        let device = device();
        let spec = serde_json::to_value(ControllerConfig::default().fire_job()).unwrap();

        let created = device.call("Schedule.Create", spec).await.unwrap();
        let id = created["id"].clone();
        assert_eq!(created["rev"], 1);

        let updated = device
            .call("Schedule.Update", json!({"id": id, "enable": false}))
            .await
            .unwrap();
        assert_eq!(updated["rev"], 2);

        let listed = device.call("Schedule.List", json!({})).await.unwrap();
        assert_eq!(listed["jobs"].as_array().unwrap().len(), 1);
        assert_eq!(listed["jobs"][0]["enable"], false);
        assert_eq!(listed["rev"], 2);
    }

    #[tokio::test]
    async fn should_reject_invalid_timespec() {
        let err = device()
            .call(
                "Schedule.Create",
                json!({"enable": true, "timespec": "0 0 25 * * *", "calls": []}),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(INVALID_ARGUMENT));
    }

    #[tokio::test]
    async fn should_fail_update_of_unknown_job() {
        let err = device()
            .call("Schedule.Update", json!({"id": 42, "enable": true}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(rpc::NOT_FOUND));
    }

    // ── Button events & ticker ─────────────────────────────────────

    #[tokio::test]
    async fn should_publish_event_when_button_triggered() {
        let (device, mut rx) = provisioned_with_feed();

        device
            .call("Button.Trigger", json!({"id": 200, "event": "single_push"}))
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.source_id, Some(200));
        assert_eq!(event.info.component, "button:200");
        assert_eq!(event.info.event, "single_push");
    }

    #[tokio::test]
    async fn should_not_trigger_missing_button() {
        let err = device()
            .call("Button.Trigger", json!({"id": 200, "event": "single_push"}))
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(rpc::NOT_FOUND));
    }

    #[tokio::test]
    async fn should_run_due_fire_job_on_tick() {
        let (device, mut rx) = provisioned_with_feed();
        let spec = serde_json::to_value(ControllerConfig::default().fire_job()).unwrap();
        device.call("Schedule.Create", spec).await.unwrap();

        assert_eq!(device.tick(&wednesday(22, 0)).await, 0);
        assert_eq!(device.tick(&wednesday(23, 0)).await, 1);

        let event = rx.recv().await.unwrap();
        assert_eq!(event, InboundEvent::button_push(ButtonId::new(200), TRIPLE_PUSH));
    }

    // ── Faults ─────────────────────────────────────────────────────

    #[tokio::test]
    async fn should_fail_with_injected_fault_until_cleared() {
        let device = provisioned();
        device.inject_fault(
            "Boolean.GetStatus",
            Fault::Remote {
                code: -1,
                message: "offline".to_string(),
            },
        );

        let err = device
            .call("Boolean.GetStatus", json!({"id": 200}))
            .await
            .unwrap_err();
        assert_eq!(err, RpcFailure::remote("Boolean.GetStatus", -1, "offline"));

        device.clear_fault("boolean.getstatus");
        assert!(device.call("Boolean.GetStatus", json!({"id": 200})).await.is_ok());
    }

    #[tokio::test]
    async fn should_drop_completion_when_fault_is_dropped() {
        let device = device();
        device.inject_fault("Schedule.List", Fault::Dropped);
        let err = device.call("Schedule.List", json!({})).await.unwrap_err();
        assert!(matches!(err, RpcFailure::Dropped { .. }));
    }

    #[tokio::test]
    async fn should_reject_unknown_method() {
        let err = device().call("Cover.Open", json!({})).await.unwrap_err();
        assert_eq!(err.code(), Some(METHOD_NOT_FOUND));
    }
}
