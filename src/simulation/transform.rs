//! Stateless transform composition helpers
//!
//! Leaf math shared by the viewer and the tests: body isometry to model
//! matrix, and the usual projection * view * model composition.

use nalgebra::{Isometry3, Matrix4};

/// Model matrix for a body's world transform.
pub fn model_matrix(transform: &Isometry3<f32>) -> Matrix4<f32> {
    transform.to_homogeneous()
}

/// Composed model-view-projection matrix.
pub fn mvp(
    projection: &Matrix4<f32>,
    view: &Matrix4<f32>,
    model: &Matrix4<f32>,
) -> Matrix4<f32> {
    projection * view * model
}
