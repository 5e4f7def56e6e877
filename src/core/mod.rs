//! # Core Application Logic
//!
//! The parts of Tessera that know nothing about terminals or HTTP:
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • ActionPayload        │
//!                    │  • SessionContext       │
//!                    │  • WorkflowState        │
//!                    │  • Config               │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │   render   │                  │  backend   │
//!         │ (ratatui)  │                  │ (reqwest)  │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`action`]: the `ActionPayload` bridge between widgets and screen owner
//! - [`session`]: per-conversation context and the workflow state machine
//! - [`config`]: `~/.tessera/config.toml` plus env/CLI overrides

pub mod action;
pub mod config;
pub mod session;
