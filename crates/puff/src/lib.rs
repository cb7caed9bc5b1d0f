//! Puff-print geometry engine
//!
//! Turns a stroke drawn on a surface into a raised, fabric-like 3D mesh:
//! - [`profile`], [`shape`], [`cross_section`] - silhouette functions
//! - [`tessellation`] - segment counts from size or detail level
//! - [`frame`] - twist-free frames along a stroke path
//! - [`mesh`] - dome and tube builders with normal smoothing and welding
//! - [`edge`] - stitched/hemmed/bound/raw edge bands
//! - [`material`] - fabric materials, gradient fills, weave normal maps
//! - [`hair`] - instanced hair strands
//! - [`session`] - the stroke state machine and mesh arena
//!
//! The engine does not depend on a renderer. Hosts implement [`Scene`];
//! the `bevy` feature adds conversions into bevy meshes.

pub mod constants;
pub mod cross_section;
pub mod edge;
pub mod frame;
pub mod generated;
pub mod hair;
pub mod material;
pub mod mesh;
pub mod profile;
pub mod scene;
pub mod session;
pub mod shape;
pub mod tessellation;
pub mod types;
pub mod validation;

#[cfg(feature = "bevy")]
mod bevy_mesh;

pub use generated::*;
pub use hair::{HairGroup, HairStrand};
pub use material::{Material, Texture, TextureWrap};
pub use mesh::{build_puff, BuildParams, MeshBuffers, PuffGeometry, PuffVertex};
pub use puff_config::{ConfigError, EngineConfig};
pub use scene::*;
pub use session::*;
pub use tessellation::Tessellation;
pub use types::*;
pub use validation::*;
