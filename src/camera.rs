use nalgebra::{Matrix4, Point3, Vector3};

/// The two fixed camera placements, both looking at the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ViewAngle {
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Camera {
    pub(crate) eye: Point3<f32>,
    pub(crate) target: Point3<f32>,
    pub(crate) up: Vector3<f32>,
}

impl Camera {
    pub(crate) fn for_angle(angle: ViewAngle) -> Self {
        let y = match angle {
            ViewAngle::Top => 4.0,
            ViewAngle::Bottom => -4.0,
        };
        Self {
            eye: Point3::new(4.0, y, 4.0),
            target: Point3::new(0.0, 0.0, 0.0),
            up: Vector3::new(0.0, 1.0, 0.0),
        }
    }

    pub(crate) fn build_view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.eye, &self.target, &self.up)
    }
}

/// Fixed square orthographic frustum.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Projection {
    pub(crate) width: f32,
    pub(crate) height: f32,
    pub(crate) znear: f32,
    pub(crate) zfar: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            width: 10.0,
            height: 10.0,
            znear: 1.0,
            zfar: 100.0,
        }
    }
}

impl Projection {
    pub(crate) fn build_projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_orthographic(
            self.width / -2.0,
            self.width / 2.0,
            self.height / -2.0,
            self.height / 2.0,
            self.znear,
            self.zfar,
        )
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct CameraUniform {
    pub(crate) view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub(crate) fn new() -> Self {
        Self {
            view_proj: Matrix4::identity().into(),
        }
    }

    pub(crate) fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_proj = (projection.build_projection_matrix() * camera.build_view_matrix()).into();
    }
}
