//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod actuator;
pub mod clock;
pub mod components;
pub mod event_bus;
pub mod rpc;
pub mod schedule_repo;
pub mod trigger_store;

pub use actuator::PowerActuator;
pub use clock::{Clock, SystemClock};
pub use components::{ComponentRegistry, ExistingComponent};
pub use event_bus::EventPublisher;
pub use rpc::RpcGateway;
pub use schedule_repo::ScheduleRepository;
pub use trigger_store::TriggerStateStore;
