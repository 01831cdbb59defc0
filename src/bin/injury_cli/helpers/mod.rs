// ABOUTME: Helper modules for injury-cli
// ABOUTME: Output formatting shared by the command modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Injury Tracker Contributors

pub mod display;
