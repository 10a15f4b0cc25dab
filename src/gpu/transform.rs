use glam::Mat4;
use wgpu::util::DeviceExt;

use crate::camera::ModelViewState;
use crate::viewer::TransformSink;

/// Remaps OpenGL clip depth `[-1, 1]` onto wgpu's `[0, 1]`:
/// `z' = (z + w) / 2`.
pub const GL_TO_WGPU_DEPTH: Mat4 = Mat4::from_cols_array(&[
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
]);

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the per-frame transform.
pub struct TransformUniform {
    /// Model-view-projection matrix (column-major), with clip depth in
    /// wgpu's `[0, 1]` range.
    pub transform: [[f32; 4]; 4],
    /// Model frame in eye space, kept for shader-side debugging.
    pub world_state: [[f32; 4]; 4],
}

impl Default for TransformUniform {
    fn default() -> Self {
        Self::from_state(&ModelViewState::default())
    }
}

impl TransformUniform {
    /// Pack a composed state into uniform layout.
    ///
    /// The composer works in OpenGL clip depth; the transform is remapped
    /// through [`GL_TO_WGPU_DEPTH`] so the near half of the depth range
    /// survives wgpu's clipping.
    #[must_use]
    pub fn from_state(state: &ModelViewState) -> Self {
        Self {
            transform: (GL_TO_WGPU_DEPTH * state.model_view)
                .to_cols_array_2d(),
            world_state: state.world_state.to_cols_array_2d(),
        }
    }
}

/// Uniform buffer, layout and bind group for the `transform` uniform.
///
/// Bound at group 0, binding 0, visible to the vertex stage.
pub struct TransformBinding {
    /// CPU-side copy of the last uploaded uniform.
    pub uniform: TransformUniform,
    /// GPU buffer backing the uniform.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for pipelines that read the transform.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group referencing [`buffer`](Self::buffer).
    pub bind_group: wgpu::BindGroup,
    queue: wgpu::Queue,
}

impl TransformBinding {
    /// Allocate the buffer and bind group on `device`. Uploads go through
    /// `queue`.
    #[must_use]
    pub fn new(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let uniform = TransformUniform::default();

        let buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Transform Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Transform Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
            label: Some("Transform Bind Group"),
        });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
            queue: queue.clone(),
        }
    }
}

impl TransformSink for TransformBinding {
    fn submit(&mut self, state: &ModelViewState) {
        self.uniform = TransformUniform::from_state(state);
        self.queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::math;

    #[test]
    fn uniform_is_two_packed_matrices() {
        let uniform = TransformUniform::default();
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 128);
    }

    #[test]
    fn columns_are_uploaded_in_order() {
        let model_view = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let uniform = TransformUniform::from_state(&ModelViewState {
            model_view,
            world_state: Mat4::IDENTITY,
        });
        // Translation lives in the fourth column; its z goes through the
        // depth remap as (3 + 1) / 2
        assert_eq!(uniform.transform[3], [1.0, 2.0, 2.0, 1.0]);
        let floats: &[f32] = bytemuck::cast_slice(&uniform.transform);
        assert_eq!(&floats[12..15], &[1.0, 2.0, 2.0]);
        assert_eq!(uniform.world_state, Mat4::IDENTITY.to_cols_array_2d());
    }

    #[test]
    fn clip_depth_is_remapped_to_zero_one() {
        let projection =
            math::perspective(30.0_f32.to_radians(), 1.0, 1.0, 2000.0)
                .unwrap();
        let uniform = TransformUniform::from_state(&ModelViewState {
            model_view: projection,
            world_state: Mat4::IDENTITY,
        });
        let transform = Mat4::from_cols_array_2d(&uniform.transform);

        // The camera looks down -Z
        let near = Vec3::new(0.0, 0.0, -1.0);
        let mid = Vec3::new(0.0, 0.0, -10.0);
        let far = Vec3::new(0.0, 0.0, -2000.0);
        assert!((projection.project_point3(near).z + 1.0).abs() < 1e-4);
        assert!(transform.project_point3(near).z.abs() < 1e-4);
        assert!((transform.project_point3(far).z - 1.0).abs() < 1e-4);
        let depth = transform.project_point3(mid).z;
        assert!(depth > 0.0 && depth < 1.0);
    }
}
