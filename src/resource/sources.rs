use std::str::FromStr;

use glam::Vec3;

use super::loader::{LoadError, ResourceLoader};

/// Where each scene resource lives, relative to the loader's root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// Comma-separated vertex positions (x, y, z per vertex).
    pub triangles: String,
    /// Comma-separated per-vertex colors derived from temperatures.
    pub temperatures: String,
    /// Comma-separated triangle indices.
    pub indices: String,
    /// Comma-separated model metadata; the first three values are the
    /// model center.
    pub metafile: String,
    /// Vertex shader source.
    pub vertex_shader: String,
    /// Fragment shader source.
    pub fragment_shader: String,
}

impl SourcePaths {
    /// Paths for a model stem such as `data/welding_sim`, with shaders in
    /// `shader_dir`.
    #[must_use]
    pub fn for_model(stem: &str, shader_dir: &str) -> Self {
        let shader_dir = shader_dir.trim_end_matches('/');
        Self {
            triangles: format!("{stem}.triangles"),
            temperatures: format!("{stem}.temperatures"),
            indices: format!("{stem}.indices"),
            metafile: format!("{stem}.metafile"),
            vertex_shader: format!("{shader_dir}/vertex.glsl"),
            fragment_shader: format!("{shader_dir}/fragment.glsl"),
        }
    }
}

/// Raw text of every resource a scene needs.
///
/// Parsing the mesh arrays is left to the renderer that uploads them; only
/// the metafile is interpreted here, to find the model center.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneSources {
    /// Vertex positions text.
    pub triangles: String,
    /// Per-vertex color text.
    pub temperatures: String,
    /// Triangle index text.
    pub indices: String,
    /// Metafile text.
    pub metafile: String,
    /// Vertex shader source.
    pub vertex_shader: String,
    /// Fragment shader source.
    pub fragment_shader: String,
    metafile_path: String,
}

impl SceneSources {
    /// Load all six resources. The first failure is returned unmodified.
    pub fn load(
        loader: &impl ResourceLoader,
        paths: &SourcePaths,
    ) -> Result<Self, LoadError> {
        let sources = Self {
            triangles: loader.load_text(&paths.triangles)?,
            temperatures: loader.load_text(&paths.temperatures)?,
            indices: loader.load_text(&paths.indices)?,
            metafile: loader.load_text(&paths.metafile)?,
            vertex_shader: loader.load_text(&paths.vertex_shader)?,
            fragment_shader: loader.load_text(&paths.fragment_shader)?,
            metafile_path: paths.metafile.clone(),
        };
        log::debug!(
            "scene sources loaded: {} bytes of triangles, {} bytes of indices",
            sources.triangles.len(),
            sources.indices.len()
        );
        Ok(sources)
    }

    /// Model center read from the first three metafile values.
    pub fn model_center(&self) -> Result<Vec3, LoadError> {
        let values: Vec<f32> =
            parse_values(&self.metafile_path, &self.metafile)?;
        match values.as_slice() {
            [x, y, z, ..] => Ok(Vec3::new(*x, *y, *z)),
            _ => Err(LoadError::Malformed {
                path: self.metafile_path.clone(),
                message: format!(
                    "expected 3 values for the model center, found {}",
                    values.len()
                ),
            }),
        }
    }
}

/// Parse comma-separated numeric text.
///
/// Whitespace around entries is ignored, as are empty entries (a trailing
/// comma or newline). `path` only labels the error.
pub fn parse_values<T: FromStr>(
    path: &str,
    text: &str,
) -> Result<Vec<T>, LoadError> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .enumerate()
        .map(|(i, s)| {
            s.parse::<T>().map_err(|_| LoadError::Malformed {
                path: path.to_owned(),
                message: format!("entry {i} ({s:?}) is not a number"),
            })
        })
        .collect()
}
