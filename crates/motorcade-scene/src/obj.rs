//! OBJ asset loading
//!
//! The road model ships in Wavefront OBJ rather than glTF, so it gets its
//! own loader: `tobj` parses the file and the result is assembled into a
//! single engine mesh. Material libraries referenced by the file are
//! ignored; surface appearance comes from the material the spawner
//! attaches.

use bevy::asset::{AssetLoader, LoadContext, RenderAssetUsages, io::Reader};
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;
use thiserror::Error;

pub struct ObjPlugin;

impl Plugin for ObjPlugin {
    fn build(&self, app: &mut App) {
        app.register_asset_loader(ObjLoader);
    }
}

/// Loader producing a single [`Mesh`] from an OBJ file
#[derive(Default)]
pub struct ObjLoader;

#[derive(Debug, Error)]
pub enum ObjLoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("OBJ parse error: {0}")]
    Parse(#[from] tobj::LoadError),

    #[error("OBJ file contains no geometry")]
    Empty,
}

impl AssetLoader for ObjLoader {
    type Asset = Mesh;
    type Settings = ();
    type Error = ObjLoaderError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &(),
        _load_context: &mut LoadContext<'_>,
    ) -> Result<Mesh, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;
        mesh_from_obj_bytes(&bytes)
    }

    fn extensions(&self) -> &[&str] {
        &["obj"]
    }
}

/// Parse OBJ text and flatten every object in it into one triangle mesh.
///
/// Normals are taken from the file when every vertex has one, otherwise
/// smooth normals are computed from the geometry.
fn mesh_from_obj_bytes(bytes: &[u8]) -> Result<Mesh, ObjLoaderError> {
    let mut reader = bytes;
    let (models, _materials) = tobj::load_obj_buf(
        &mut reader,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..tobj::LoadOptions::default()
        },
        // .mtl lookups are skipped entirely
        |_material_path| Ok((Vec::new(), Default::default())),
    )?;

    if models.is_empty() {
        return Err(ObjLoaderError::Empty);
    }

    let mut positions: Vec<[f32; 3]> = Vec::new();
    let mut normals: Vec<[f32; 3]> = Vec::new();
    let mut uvs: Vec<[f32; 2]> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for model in models {
        let mesh = model.mesh;
        let base = positions.len() as u32;
        positions.extend(mesh.positions.chunks_exact(3).map(|p| [p[0], p[1], p[2]]));
        normals.extend(mesh.normals.chunks_exact(3).map(|n| [n[0], n[1], n[2]]));
        uvs.extend(mesh.texcoords.chunks_exact(2).map(|t| [t[0], t[1]]));
        indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    if positions.is_empty() {
        return Err(ObjLoaderError::Empty);
    }

    let have_normals = normals.len() == positions.len();
    let have_uvs = uvs.len() == positions.len();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    if have_normals {
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }
    if have_uvs {
        mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    }
    mesh.insert_indices(Indices::U32(indices));
    if !have_normals {
        mesh.compute_smooth_normals();
    }

    Ok(mesh)
}
