//! Data structures for imported scenes and loaded models.
//!
//! This module contains the data types on both sides of the conversion
//! pipeline:
//!
//! - `scene` is the importer-facing representation (node tree, raw meshes,
//!   materials with texture path references)
//! - `model` is the renderer-facing output (flattened vertices, triangle
//!   indices, resolved textures, the loaded model itself)
//! - `texture` contains the GPU texture wrapper and creation utilities

pub mod model;
pub mod scene;
pub mod texture;
