//! ListenDrift - attention-drop analysis CLI
//!
//! This crate uploads recorded speech to the ListenDrift analysis service,
//! polls the job until it finishes, and renders where a talk is likely to
//! lose its listeners. Audio comes from a file or straight from the
//! microphone.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, state machines, and errors
//! - **Application**: Use cases and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (HTTP API, cpal capture, config)
//! - **CLI**: Command-line interface, argument parsing, and output rendering

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
