// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
pub mod aggregator;
pub mod config;
pub mod constants;
pub mod error;
pub mod generator;
pub mod kubernetes;
pub mod object;
pub mod runner;
pub mod submit;
pub mod worker;

#[cfg(test)]
pub mod test_utils;
