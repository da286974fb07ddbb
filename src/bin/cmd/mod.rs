// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod cloud;
mod image;
mod map;

pub use cloud::CloudCmd;
pub use image::ImageCmd;
pub use map::MapCmd;
