// Copyright © 2025
// Author: Nocthir <nocthir@proton.me>
// SPDX-License-Identifier: MIT or Apache-2.0

//! Library entry point for hitbox-rs, for benchmarks and tests.

pub mod camera;
pub mod demo;
pub mod hitbox;
pub mod settings;
pub mod ui;
