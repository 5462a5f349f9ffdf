//! # idea-match
//!
//! Ranks a small set of stored hackathon ideas by how similar they are to a
//! new idea. A chat-completion model judges the similarity; when no API key
//! is configured or the call fails, seeded pseudo-random scores stand in.
//!
//! ## Request flow
//!
//! ```text
//!   POST /api/match {"new_idea": ...}
//!              │
//!              ▼
//!   ┌───────────────────────┐
//!   │  Load ideas.json      │  re-read per request
//!   └───────────┬───────────┘
//!               ▼
//!   ┌───────────────────────┐
//!   │  Ranking prompt       │  "{n}. {username}: {idea}" per record
//!   └───────────┬───────────┘
//!               ▼
//!   ┌───────────────────────┐      failure / no key
//!   │  Chat completion (1x) │ ─────────────────────┐
//!   └───────────┬───────────┘                      ▼
//!               ▼                      ┌───────────────────────┐
//!   ┌───────────────────────┐          │  Seeded fallback      │
//!   │  Validate JSON reply  │          │  10-95, sorted desc   │
//!   │  join on username     │          └───────────┬───────────┘
//!   └───────────┬───────────┘                      │
//!               └──────────────┬───────────────────┘
//!                              ▼
//!                  {rankings, source: remote|fallback}
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration for the server and the matcher
//! - [`models`] - Idea records, ranking results, request/response types
//! - [`storage`] - Read-only JSON idea store
//! - [`llm::prompt`] - Ranking prompt and the validated reply schema
//! - [`llm::chat`] - OpenAI-compatible chat-completion call
//! - [`ranking`] - Remote-or-fallback orchestration and [`ranking::RankError`]
//! - [`api`] - Axum handlers for ideas, matching and matcher config
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod llm;
pub mod models;
pub mod ranking;
pub mod state;
pub mod storage;
