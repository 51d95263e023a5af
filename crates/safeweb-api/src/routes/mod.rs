//! # API Route Modules
//!
//! - `demo` — the public demo endpoints (`/`, `/error`, `/secret`,
//!   `/deserialize`).

pub mod demo;
