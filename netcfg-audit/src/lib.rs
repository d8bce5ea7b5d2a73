//! Router and switch configuration intelligence.
//!
//! This library implements a four-stage change-safety pipeline over raw
//! device configuration text. Every stage is a pure, synchronous function:
//! no I/O, no shared state, safe to call concurrently. Malformed input
//! never raises; each stage degrades to a best-effort partial result.
//!
//! # Pipeline
//!
//! 1. **Parse** — [`detect::detect_vendor`] + [`parse::parse`] turn raw
//!    text into a structured [`model::DeviceConfig`] (Cisco, Juniper, or a
//!    generic extraction for unknown vendors).
//! 2. **Validate** — [`validate::validate`] applies the declarative rule
//!    table from [`rules`] and the structural checks from [`checks`],
//!    yielding a list of [`model::Issue`]s.
//! 3. **Diff / risk** — [`compare::compare_configs`] computes a semantic
//!    diff between two snapshots, matched entity-by-entity, with weighted
//!    per-category risk scores from [`risk`].
//! 4. **Review** — [`review::review_change`] gates a free-text change
//!    proposal against the critical-change [`signatures`] and produces a
//!    go / no-go decision with an impact matrix and rollback plan.
//!
//! Each stage has a Markdown `format_*` renderer ([`report`],
//! [`summary::format_analysis`], [`validate::format_report`]) whose section
//! headers are a stable output contract for the calling layers.
//!
//! # Built on cfgtree-core
//!
//! Generic indented-text tree parsing and deterministic line diffing live
//! in `cfgtree-core`; all vendor- and risk-specific logic is in this crate.

pub mod checks;
pub mod compare;
pub mod detect;
pub mod model;
pub mod parse;
pub mod report;
pub mod review;
pub mod risk;
pub mod rules;
pub mod signatures;
pub mod summary;
pub mod validate;
