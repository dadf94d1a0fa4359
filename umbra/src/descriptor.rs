use glam::UVec2;
use umbra_kernels::Material;

use crate::{DenoiserError, Resources, Texture};

/// Names of the buffers a denoiser reads and writes.
///
/// Without a material the denoiser works as a shadow / visibility filter
/// and writes the filtered signal directly; with one, the signal is treated
/// as a final color which gets demodulated by albedo before filtering and
/// remodulated (plus emission) afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BufferDescriptor {
    /// Noisy signal, RGB in `xyz`.
    pub signal: String,

    pub surface: SurfaceDescriptor,

    /// Screen-space motion, in pixels, in `xy`.
    pub motion_vectors: String,

    pub material: Option<MaterialDescriptor>,

    /// Additional buffers that must be present for the frame to be
    /// processed, even though the denoiser doesn't read them.
    pub extra: Vec<String>,

    pub output: String,
}

/// Where the denoiser takes depth and normals from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SurfaceDescriptor {
    /// Single buffer with linear depth, its screen-space derivative and
    /// octahedron-encoded normal; see [`umbra_kernels::DepthNormal`].
    Packed(String),

    /// Separate G-buffer attachments, packed by the denoiser itself.
    Separate {
        /// Linear depth in `x` and its screen-space derivative in `y`.
        linear_z: String,

        /// World-space normal in `xyz`.
        world_normal: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialDescriptor {
    pub albedo: String,
    pub emission: String,
}

impl BufferDescriptor {
    pub fn new(
        signal: impl Into<String>,
        depth_normal: impl Into<String>,
        motion_vectors: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            signal: signal.into(),
            surface: SurfaceDescriptor::Packed(depth_normal.into()),
            motion_vectors: motion_vectors.into(),
            material: None,
            extra: Default::default(),
            output: output.into(),
        }
    }

    /// Creates a descriptor reading depth and normals straight from the
    /// G-buffer's linear-z and world-normal attachments.
    pub fn from_gbuffer(
        signal: impl Into<String>,
        linear_z: impl Into<String>,
        world_normal: impl Into<String>,
        motion_vectors: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            signal: signal.into(),
            surface: SurfaceDescriptor::Separate {
                linear_z: linear_z.into(),
                world_normal: world_normal.into(),
            },
            motion_vectors: motion_vectors.into(),
            material: None,
            extra: Default::default(),
            output: output.into(),
        }
    }

    pub fn with_material(
        mut self,
        albedo: impl Into<String>,
        emission: impl Into<String>,
    ) -> Self {
        self.material = Some(MaterialDescriptor {
            albedo: albedo.into(),
            emission: emission.into(),
        });

        self
    }

    pub fn with_required(mut self, name: impl Into<String>) -> Self {
        self.extra.push(name.into());
        self
    }

    pub fn is_color(&self) -> bool {
        self.material.is_some()
    }

    /// Returns every input buffer together with its role.
    pub fn inputs(&self) -> Vec<(&'static str, &str)> {
        let mut inputs = vec![("signal", self.signal.as_str())];

        match &self.surface {
            SurfaceDescriptor::Packed(depth_normal) => {
                inputs.push(("depth_normal", depth_normal.as_str()));
            }

            SurfaceDescriptor::Separate {
                linear_z,
                world_normal,
            } => {
                inputs.push(("linear_z", linear_z.as_str()));
                inputs.push(("world_normal", world_normal.as_str()));
            }
        }

        inputs.push(("motion_vectors", self.motion_vectors.as_str()));

        if let Some(material) = &self.material {
            inputs.push(("albedo", material.albedo.as_str()));
            inputs.push(("emission", material.emission.as_str()));
        }

        for name in &self.extra {
            inputs.push(("extra", name.as_str()));
        }

        inputs
    }

    pub fn validate(&self) -> Result<(), DenoiserError> {
        let inputs = self.inputs();

        if let Some(&(role, _)) = inputs.iter().find(|(_, name)| name.is_empty())
        {
            return Err(DenoiserError::EmptyName { role });
        }

        if self.output.is_empty() {
            return Err(DenoiserError::EmptyName { role: "output" });
        }

        for (idx, &(first, name)) in inputs.iter().enumerate() {
            if let Some(&(second, _)) =
                inputs[idx + 1..].iter().find(|(_, other)| *other == name)
            {
                return Err(DenoiserError::DuplicateName {
                    name: name.to_owned(),
                    first,
                    second,
                });
            }
        }

        if let Some(&(role, _)) =
            inputs.iter().find(|(_, name)| *name == self.output)
        {
            return Err(DenoiserError::OutputAliasesInput {
                name: self.output.clone(),
                role,
            });
        }

        Ok(())
    }

    /// Looks up the inputs for a frame of given size; returns `None` if any
    /// of them is missing or has a different size.
    pub(crate) fn resolve<'a>(
        &self,
        resources: &'a Resources,
        size: UVec2,
    ) -> Option<FrameInputs<'a>> {
        let get = |name: &str| {
            resources.get(name).filter(|texture| texture.size() == size)
        };

        for name in &self.extra {
            get(name)?;
        }

        let material = if let Some(material) = &self.material {
            Some((get(&material.albedo)?, get(&material.emission)?))
        } else {
            None
        };

        let surface = match &self.surface {
            SurfaceDescriptor::Packed(depth_normal) => {
                FrameSurface::Packed(get(depth_normal)?)
            }

            SurfaceDescriptor::Separate {
                linear_z,
                world_normal,
            } => FrameSurface::Separate {
                linear_z: get(linear_z)?,
                world_normal: get(world_normal)?,
            },
        };

        Some(FrameInputs {
            signal: get(&self.signal)?,
            surface,
            motion_vectors: get(&self.motion_vectors)?,
            material,
        })
    }
}

/// Inputs of a single frame, as resolved from [`Resources`].
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub signal: &'a Texture,
    pub surface: FrameSurface<'a>,
    pub motion_vectors: &'a Texture,
    pub material: Option<(&'a Texture, &'a Texture)>,
}

#[derive(Clone, Copy, Debug)]
pub enum FrameSurface<'a> {
    Packed(&'a Texture),

    Separate {
        linear_z: &'a Texture,
        world_normal: &'a Texture,
    },
}

impl<'a> FrameInputs<'a> {
    pub fn material(&self) -> Option<Material<'a>> {
        self.material.map(|(albedo, emission)| Material {
            albedo: albedo.view(),
            emission: emission.view(),
        })
    }
}
