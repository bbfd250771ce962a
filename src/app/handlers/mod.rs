// SPDX-License-Identifier: GPL-3.0-only

//! Message handler modules
//!
//! Handlers are grouped by functional domain and all live in `impl Booth`
//! blocks.

pub mod camera;
pub mod capture;
pub mod export;
pub mod session;
