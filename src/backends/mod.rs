// SPDX-License-Identifier: MPL-2.0

//! Backend abstractions for video sources

pub mod camera;
