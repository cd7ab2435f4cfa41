// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! daybook library
//!
//! This module exports the core functionality of daybook for use in
//! integration tests and as a library.

pub mod analyzer;
pub mod commands;
pub mod config;
pub mod daily;
pub mod store;
pub mod sync;
pub mod workflow;
