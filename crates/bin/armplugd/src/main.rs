//! # armplugd: deferred-activation controller daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Start the simulated device host and the in-process event feed
//! - Construct the typed device ports on top of the device RPC gateway
//! - Provision the virtual button and boolean, then reconcile the fire job
//! - Run the controller loop and the device's job scheduler
//! - Build the axum router and serve it until Ctrl+C
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use armplug_adapter_device_rpc::{
    RpcComponentRegistry, RpcScheduleRepository, RpcSwitch, RpcTriggerStore,
};
use armplug_adapter_http_axum::state::AppState;
use armplug_adapter_virtual::VirtualDevice;
use armplug_app::controller::Controller;
use armplug_app::event_bus::InProcessEventBus;
use armplug_app::ports::SystemClock;
use armplug_app::provisioning::Provisioner;
use armplug_app::reconciler::ScheduleReconciler;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let controller_config = config.controller_config()?;

    // Simulated device and its event feed
    let (bus, events) = InProcessEventBus::channel(config.events.capacity);
    let bus = Arc::new(bus);
    let device = Arc::new(VirtualDevice::with_switches(
        Arc::clone(&bus),
        [controller_config.switch_id],
    ));

    // Device ports
    let trigger = Arc::new(RpcTriggerStore::new(
        Arc::clone(&device),
        controller_config.trigger_id,
    ));
    let schedules = Arc::new(RpcScheduleRepository::new(Arc::clone(&device)));
    let switch = RpcSwitch::new(Arc::clone(&device), controller_config.switch_id);

    // The fire job presses the virtual button, so provision it first.
    // Failures are logged by the provisioner and startup goes on.
    let provisioned = Provisioner::new(RpcComponentRegistry::new(Arc::clone(&device)))
        .ensure_all(&controller_config.trigger_components())
        .await;
    let failed = provisioned.iter().filter(|outcome| outcome.is_err()).count();
    if failed > 0 {
        warn!(failed, "continuing without every trigger component");
    }

    let reconciler = ScheduleReconciler::from_config(Arc::clone(&schedules), &controller_config);
    tokio::spawn(async move {
        if reconciler.reconcile().await.is_err() {
            warn!("continuing without the fire job");
        }
    });

    let controller = Controller::from_config(
        &controller_config,
        Arc::clone(&trigger),
        switch,
        SystemClock,
    );
    let controller_task = tokio::spawn(controller.run(events));

    let scheduler = Arc::clone(&device);
    let scheduler_task = tokio::spawn(async move { scheduler.run_scheduler(SystemClock).await });

    // HTTP
    let state = AppState::from_config(&controller_config, trigger, schedules, Arc::clone(&bus));
    let app = armplug_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(%bind_addr, "armplugd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    scheduler_task.abort();
    controller_task.abort();
    info!("armplugd stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(err) => warn!(error = %err, "failed to listen for Ctrl+C, shutting down"),
    }
}
