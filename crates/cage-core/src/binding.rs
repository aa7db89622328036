//! Target property binding
//!
//! The cage drives an externally owned 4x4 matrix exposed as a named array of
//! 16 floats. Values are column-major, matching [`Mat4::to_cols_array`], so
//! the translation lives in elements 12..15.

use std::sync::Arc;

use glam::Mat4;
use parking_lot::Mutex;

use crate::constants::{MATRIX_LEN, MATRIX_PROPERTY};

/// An externally owned float array property
pub trait TargetProperty {
    /// Property identifier
    fn idname(&self) -> &str;

    /// Number of floats in the property
    fn array_length(&self) -> usize;

    /// Copy the current value into `out`
    fn get_array(&self, out: &mut [f32]);

    /// Replace the current value
    fn set_array(&mut self, values: &[f32]);
}

/// A validated binding to a `"matrix"` property of 16 floats
pub struct MatrixBinding {
    target: Box<dyn TargetProperty>,
}

impl std::fmt::Debug for MatrixBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatrixBinding")
            .field("idname", &self.target.idname())
            .finish()
    }
}

impl MatrixBinding {
    /// Bind to a property, checking its name and length
    pub fn new(target: Box<dyn TargetProperty>) -> Result<Self, BindingError> {
        validate(target.as_ref())?;
        Ok(Self { target })
    }

    /// Read the bound matrix
    pub fn get(&self) -> Result<Mat4, BindingError> {
        validate(self.target.as_ref())?;
        let mut values = [0.0; MATRIX_LEN];
        self.target.get_array(&mut values);
        Ok(Mat4::from_cols_array(&values))
    }

    /// Write the bound matrix
    pub fn set(&mut self, matrix: &Mat4) {
        self.target.set_array(&matrix.to_cols_array());
    }
}

fn validate(target: &dyn TargetProperty) -> Result<(), BindingError> {
    if target.idname() != MATRIX_PROPERTY {
        return Err(BindingError::UnknownProperty(target.idname().to_string()));
    }
    let len = target.array_length();
    if len != MATRIX_LEN {
        return Err(BindingError::LengthMismatch {
            expected: MATRIX_LEN,
            actual: len,
        });
    }
    Ok(())
}

/// Matrix property shared between the cage and its owner
#[derive(Debug, Clone, Default)]
pub struct SharedMatrixProperty {
    value: Arc<Mutex<Mat4>>,
}

impl SharedMatrixProperty {
    /// Create a property holding `matrix`
    pub fn new(matrix: Mat4) -> Self {
        Self {
            value: Arc::new(Mutex::new(matrix)),
        }
    }

    /// Current value
    pub fn matrix(&self) -> Mat4 {
        *self.value.lock()
    }

    /// Overwrite the value from the owner's side
    pub fn set_matrix(&self, matrix: Mat4) {
        *self.value.lock() = matrix;
    }
}

impl TargetProperty for SharedMatrixProperty {
    fn idname(&self) -> &str {
        MATRIX_PROPERTY
    }

    fn array_length(&self) -> usize {
        MATRIX_LEN
    }

    fn get_array(&self, out: &mut [f32]) {
        let values = self.value.lock().to_cols_array();
        let n = out.len().min(MATRIX_LEN);
        out[..n].copy_from_slice(&values[..n]);
    }

    fn set_array(&mut self, values: &[f32]) {
        if let Ok(values) = <&[f32; MATRIX_LEN]>::try_from(values) {
            *self.value.lock() = Mat4::from_cols_array(values);
        }
    }
}

/// Binding errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum BindingError {
    #[error("Cage can only bind the \"matrix\" property, got {0:?}")]
    UnknownProperty(String),
    #[error("Matrix property must have {expected} floats, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
