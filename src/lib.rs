//! ClientFlow Booking - Multi-Tenant Appointment Scheduling Core
//!
//! This crate implements the public booking surface of the ClientFlow
//! operations suite: slot generation from recurring availability, conflict-safe
//! booking commits, and signed confirmation webhooks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
