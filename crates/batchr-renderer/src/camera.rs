//! Cameras consumed by [`BatchRenderer::begin`](crate::BatchRenderer::begin).

use glam::{Mat4, Vec3};

/// Anything that can supply a view-projection matrix for a batch.
pub trait Camera {
    fn view_projection(&self) -> Mat4;
}

impl Camera for Mat4 {
    fn view_projection(&self) -> Mat4 {
        *self
    }
}

/// Orthographic 2D camera driven by zoom, aspect ratio, position and
/// rotation.
///
/// The visible region spans `±aspect·zoom` horizontally and `±zoom`
/// vertically around `position`. Every setter recomputes the cached
/// matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct OrthographicCamera2D {
    view: Mat4,
    projection: Mat4,
    view_projection: Mat4,
    zoom: f32,
    aspect: f32,
    position: Vec3,
    rotation: f32,
}

impl OrthographicCamera2D {
    pub fn new(aspect_ratio: f32, zoom: f32) -> Self {
        let mut camera = Self {
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            view_projection: Mat4::IDENTITY,
            zoom,
            aspect: aspect_ratio,
            position: Vec3::ZERO,
            rotation: 0.0,
        };
        camera.update_view_matrix();
        camera.update_projection_matrix();
        camera
    }

    pub fn view(&self) -> &Mat4 {
        &self.view
    }

    pub fn projection(&self) -> &Mat4 {
        &self.projection
    }

    pub fn zoom(&self) -> f32 {
        self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = zoom;
        self.update_projection_matrix();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_view_matrix();
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Rotation about the Z axis, in radians.
    pub fn set_rotation(&mut self, radians: f32) {
        self.rotation = radians;
        self.update_view_matrix();
    }

    fn update_view_matrix(&mut self) {
        let transform = Mat4::from_translation(self.position) * Mat4::from_rotation_z(self.rotation);
        self.view = transform.inverse();
        self.view_projection = self.projection * self.view;
    }

    fn update_projection_matrix(&mut self) {
        let half_width = self.aspect * self.zoom;
        self.projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -self.zoom,
            self.zoom,
            -1.0,
            1.0,
        );
        self.view_projection = self.projection * self.view;
    }
}

impl Default for OrthographicCamera2D {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

impl Camera for OrthographicCamera2D {
    fn view_projection(&self) -> Mat4 {
        self.view_projection
    }
}
