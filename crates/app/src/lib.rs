//! # armplug-app
//!
//! Application layer: use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `RpcGateway`: raw device RPC calls
//!   - `TriggerStateStore`: read/write the persisted arm state
//!   - `ScheduleRepository`: list, create and update scheduled jobs
//!   - `PowerActuator`: switch the output
//!   - `ComponentRegistry`: look up and provision virtual components
//!   - `EventPublisher`: push device events into the feed
//!   - `Clock`: local wall-clock time
//! - Provide the **use-cases** built on those ports:
//!   - `EventRouter`: classify inbound events
//!   - `ActivationMachine`: the arm/disarm/fire state machine
//!   - `ScheduleReconciler`: keep exactly one fire job on the device
//!   - `Provisioner`: ensure the virtual button and boolean exist
//!   - `Controller`: single-consumer dispatch loop over the event feed
//! - Provide **in-process infrastructure** (event bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `armplug-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod activation;
pub mod controller;
pub mod event_bus;
pub mod ports;
pub mod provisioning;
pub mod reconciler;
pub mod router;
