//! Convolution kernels

use crate::error::{RasterError, Result};

/// A 2D weight matrix stored row-major
///
/// Both dimensions are odd so the kernel has a unique center cell at
/// `(height / 2, width / 2)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    weights: Vec<f32>,
    width: usize,
    height: usize,
}

impl Kernel {
    /// Construct a kernel from row-major weights and its dimensions
    ///
    /// # Errors
    /// `InvalidKernel` if either dimension is zero or even, or if
    /// `weights.len() != width * height`.
    pub fn new(weights: Vec<f32>, width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidKernel(format!(
                "dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if width.is_multiple_of(2) || height.is_multiple_of(2) {
            return Err(RasterError::InvalidKernel(format!(
                "dimensions must be odd to have a center, got {}x{}",
                width, height
            )));
        }
        if weights.len() != width * height {
            return Err(RasterError::InvalidKernel(format!(
                "{}x{} kernel needs {} weights, got {}",
                width,
                height,
                width * height,
                weights.len()
            )));
        }
        Ok(Self {
            weights,
            width,
            height,
        })
    }

    /// Construct a kernel by copying a borrowed slice
    pub fn from_slice(weights: &[f32], width: usize, height: usize) -> Result<Self> {
        Self::new(weights.to_vec(), width, height)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    #[inline]
    pub fn center_row(&self) -> usize {
        self.height / 2
    }

    #[inline]
    pub fn center_col(&self) -> usize {
        self.width / 2
    }

    /// Flat index of the center cell
    #[inline]
    pub fn center_index(&self) -> usize {
        self.center_row() * self.width + self.center_col()
    }

    /// Weight at kernel row `row`, column `col`, or `None` outside the kernel
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> Option<f32> {
        (row < self.height && col < self.width).then(|| self.weights[row * self.width + col])
    }

    /// 3x3 kernel that reproduces its input
    pub fn identity_3x3() -> Self {
        Self::fixed_3x3([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0])
    }

    /// Horizontal-gradient Sobel kernel
    pub fn sobel_x() -> Self {
        Self::fixed_3x3([-1.0, 0.0, 1.0, -2.0, 0.0, 2.0, -1.0, 0.0, 1.0])
    }

    /// Vertical-gradient Sobel kernel
    pub fn sobel_y() -> Self {
        Self::fixed_3x3([-1.0, -2.0, -1.0, 0.0, 0.0, 0.0, 1.0, 2.0, 1.0])
    }

    /// 4-neighbour Laplacian
    pub fn laplacian() -> Self {
        Self::fixed_3x3([0.0, 1.0, 0.0, 1.0, -4.0, 1.0, 0.0, 1.0, 0.0])
    }

    pub fn sharpen() -> Self {
        Self::fixed_3x3([0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0])
    }

    pub fn box_blur_3x3() -> Self {
        Self::fixed_3x3([1.0 / 9.0; 9])
    }

    fn fixed_3x3(weights: [f32; 9]) -> Self {
        Self {
            weights: weights.to_vec(),
            width: 3,
            height: 3,
        }
    }
}

/// Built-in kernels selectable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KernelPreset {
    Identity,
    #[default]
    SobelX,
    SobelY,
    Laplacian,
    Sharpen,
    BoxBlur,
}

impl KernelPreset {
    pub const ALL: [KernelPreset; 6] = [
        KernelPreset::Identity,
        KernelPreset::SobelX,
        KernelPreset::SobelY,
        KernelPreset::Laplacian,
        KernelPreset::Sharpen,
        KernelPreset::BoxBlur,
    ];

    pub fn kernel(self) -> Kernel {
        match self {
            KernelPreset::Identity => Kernel::identity_3x3(),
            KernelPreset::SobelX => Kernel::sobel_x(),
            KernelPreset::SobelY => Kernel::sobel_y(),
            KernelPreset::Laplacian => Kernel::laplacian(),
            KernelPreset::Sharpen => Kernel::sharpen(),
            KernelPreset::BoxBlur => Kernel::box_blur_3x3(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            KernelPreset::Identity => "Identity",
            KernelPreset::SobelX => "Sobel X",
            KernelPreset::SobelY => "Sobel Y",
            KernelPreset::Laplacian => "Laplacian",
            KernelPreset::Sharpen => "Sharpen",
            KernelPreset::BoxBlur => "Box blur",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_of_3x3() {
        let k = Kernel::identity_3x3();
        assert_eq!((k.center_row(), k.center_col()), (1, 1));
        assert_eq!(k.center_index(), 4);
        assert_eq!(k.weight(1, 1), Some(1.0));
    }

    #[test]
    fn test_center_of_rectangular_kernel() {
        let k = Kernel::new(vec![0.0; 15], 5, 3).unwrap();
        assert_eq!(k.center_index(), 5 + 2);
    }

    #[test]
    fn test_rejects_even_dimensions() {
        assert!(matches!(
            Kernel::new(vec![0.0; 4], 2, 2),
            Err(RasterError::InvalidKernel(_))
        ));
        assert!(Kernel::new(vec![0.0; 6], 3, 2).is_err());
    }

    #[test]
    fn test_rejects_zero_dimensions() {
        assert!(Kernel::new(Vec::new(), 0, 3).is_err());
    }

    #[test]
    fn test_rejects_length_mismatch() {
        assert!(Kernel::from_slice(&[1.0; 8], 3, 3).is_err());
    }

    #[test]
    fn test_presets_are_valid() {
        for preset in KernelPreset::ALL {
            let k = preset.kernel();
            assert!(Kernel::new(k.weights().to_vec(), k.width(), k.height()).is_ok());
        }
    }

    #[test]
    fn test_weight_lookup() {
        let k = Kernel::sobel_x();
        assert_eq!(k.weight(0, 0), Some(-1.0));
        assert_eq!(k.weight(1, 2), Some(2.0));
        assert_eq!(k.weight(3, 0), None);
        assert_eq!(k.weight(0, 3), None);
    }
}
