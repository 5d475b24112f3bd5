//! Personal debt tracking with payoff projections.
//!
//! [`core`] holds the simulation engine: single-debt amortization, bounded
//! payment plans, and the avalanche/snowball strategy simulator. [`ledger`]
//! stores debts and payments; [`api`] exposes both through a CLI and a JSON
//! HTTP API.

pub mod api;
pub mod core;
pub mod ledger;
