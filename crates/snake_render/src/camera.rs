use glam::Mat4;

#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

/// Screen-space camera: world units are pixels, origin at the top-left
/// corner, y growing downward. This matches the board's grid layout so
/// quad positions come straight out of cell coordinates.
pub struct ScreenCamera {
    pub viewport: (u32, u32),
}

impl ScreenCamera {
    pub fn new(viewport_width: u32, viewport_height: u32) -> Self {
        Self {
            viewport: (viewport_width, viewport_height),
        }
    }

    pub fn build_uniform(&self) -> CameraUniform {
        let (w, h) = self.viewport;
        // Top < bottom flips the y axis into screen orientation.
        let proj = Mat4::orthographic_rh(0.0, w.max(1) as f32, h.max(1) as f32, 0.0, -1.0, 1.0);

        CameraUniform {
            view_proj: proj.to_cols_array_2d(),
        }
    }
}
