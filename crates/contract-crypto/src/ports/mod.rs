//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that contract and runtime code calls
//! - **Outbound (Driven)**: the cryptographic provider this crate needs

pub mod inbound;
pub mod outbound;
