//! # armplug-domain
//!
//! Pure domain model for the armplug deferred-activation controller.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error taxonomy, timestamps
//! - Define the **trigger state** (armed / disarmed) mirrored by a virtual boolean
//! - Define **scheduled jobs** and the cron-like timespec they run on
//! - Define **inbound events** and the **activation events** they route to
//! - Define the **time-window policy** (weekend, happy hour, normal)
//! - Define the **virtual components** provisioned on the device
//! - Hold the immutable **controller configuration** built once at startup
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod component;
pub mod config;
pub mod event;
pub mod schedule;
pub mod time_window;
pub mod trigger;
