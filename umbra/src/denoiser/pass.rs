use glam::{UVec2, Vec4};
use log::debug;
use rayon::prelude::*;
use umbra_kernels::idx_to_screen;

use crate::{measure, Texture};

/// Schedules a per-pixel kernel over the entire screen.
#[derive(Debug)]
pub struct DenoiserPass {
    label: String,
}

impl DenoiserPass {
    pub fn new(label: impl ToString) -> Self {
        let label = label.to_string();

        debug!("Initializing pass: {label}");

        Self { label }
    }

    /// Evaluates `kernel` for every pixel of `target`, storing the results
    /// there.
    pub fn run<F>(&self, target: &mut Texture, kernel: F)
    where
        F: Fn(UVec2) -> Vec4 + Sync,
    {
        let size = target.size();

        self.measure(|| {
            target.pixels_mut().par_iter_mut().enumerate().for_each(
                |(idx, pixel)| {
                    *pixel = kernel(idx_to_screen(size, idx));
                },
            );
        });
    }

    pub fn measure<T>(&self, f: impl FnOnce() -> T) -> T {
        measure(&format!("umbra_{}_pass", self.label), f)
    }
}
