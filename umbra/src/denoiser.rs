mod buffers;
mod pass;
mod passes;
mod state;


use std::mem;

use glam::UVec2;
use log::{debug, info, warn};

pub(crate) use self::buffers::*;
pub(crate) use self::pass::*;
pub(crate) use self::passes::*;
pub use self::state::*;
use crate::{
    BufferDescriptor, ConfigSchema, DenoiserConfig, DenoiserError, Resources,
    Texture,
};

/// Spatiotemporal variance-guided filter.
///
/// Owns the history and scratch buffers; everything else (the noisy signal,
/// the G-buffer and the output) is provided by the host through
/// [`Resources`], under the names given by the [`BufferDescriptor`].
///
/// Before the first frame can be denoised, the denoiser has to be told the
/// screen size through [`Self::resize()`].
#[derive(Debug)]
pub struct Denoiser {
    descriptor: BufferDescriptor,
    config: DenoiserConfig,
    state: DenoiserState,
    buffers: Option<DenoiserBuffers>,
    passes: DenoiserPasses,
    frame: u32,
}

/// What happened during [`Denoiser::execute()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Some of the required buffers were missing (or had unexpected size);
    /// nothing got written.
    NotReady,

    /// Filtering is disabled; the noisy signal got copied into the output.
    Bypassed,

    /// The signal went through the entire filter chain; `cleared` tells
    /// whether the history had been reset first.
    Denoised { cleared: bool },
}

impl Denoiser {
    pub fn new(
        descriptor: BufferDescriptor,
        config: DenoiserConfig,
    ) -> Result<Self, DenoiserError> {
        descriptor.validate()?;

        info!(
            "Creating denoiser: {} -> {}",
            descriptor.signal, descriptor.output
        );

        let config = config.clamped();
        let passes = DenoiserPasses::new(&descriptor);

        debug!("Denoiser created; config={:?}", config);

        Ok(Self {
            state: DenoiserState::new(config.enabled),
            descriptor,
            config,
            buffers: None,
            passes,
            frame: 0,
        })
    }

    pub fn descriptor(&self) -> &BufferDescriptor {
        &self.descriptor
    }

    /// Returns names of all the buffers that must be present in
    /// [`Resources`] for a frame to get processed.
    pub fn required_buffers(&self) -> Vec<&str> {
        let mut names: Vec<_> = self
            .descriptor
            .inputs()
            .into_iter()
            .map(|(_, name)| name)
            .collect();

        names.push(&self.descriptor.output);
        names
    }

    pub fn config(&self) -> &DenoiserConfig {
        &self.config
    }

    pub fn describe_config(&self) -> ConfigSchema {
        self.config.schema()
    }

    /// Changes the configuration; any actual change invalidates the history.
    pub fn set_config(&mut self, config: DenoiserConfig) {
        let config = config.clamped();

        if config == self.config {
            return;
        }

        let prev = mem::replace(&mut self.config, config);
        let mut state = self.state.toggled(config.enabled);

        let params_changed = DenoiserConfig {
            enabled: config.enabled,
            ..prev
        } != config;

        if params_changed {
            state = state.invalidated();
        }

        debug!(
            "Config changed; state: {:?} -> {:?}, config={:?}",
            self.state, state, config
        );

        self.state = state;
    }

    pub fn update_config(&mut self, f: impl FnOnce(&mut DenoiserConfig)) {
        let mut config = self.config;

        f(&mut config);

        self.set_config(config);
    }

    /// (Re)allocates buffers for given screen size and invalidates the
    /// history.
    pub fn resize(&mut self, size: UVec2) {
        if size.x == 0 || size.y == 0 {
            warn!("Ignoring resize of `{}` to {size}", self.descriptor.output);
            return;
        }

        debug!("Resizing `{}` to {size}", self.descriptor.output);

        if self.size() != Some(size) {
            self.buffers = Some(DenoiserBuffers::new(size));
        }

        self.state = self.state.invalidated();
    }

    pub fn size(&self) -> Option<UVec2> {
        self.buffers.as_ref().map(|buffers| buffers.size)
    }

    pub fn state(&self) -> DenoiserState {
        self.state
    }

    /// Returns the number of frames that went through the filter chain.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Returns illumination that will be used as history for the next frame.
    pub fn filtered_past(&self) -> Option<&Texture> {
        self.buffers.as_ref().map(|buffers| &buffers.filtered_past)
    }

    /// Returns illumination of the latest frame after temporal accumulation,
    /// with temporal variance in `w`.
    pub fn illumination(&self) -> Option<&Texture> {
        self.buffers.as_ref().map(|buffers| &buffers.illumination)
    }

    pub fn moments(&self) -> Option<&Texture> {
        self.buffers.as_ref().map(|buffers| buffers.moments.front())
    }

    pub fn history_length(&self) -> Option<&Texture> {
        self.buffers.as_ref().map(|buffers| buffers.history_length.front())
    }

    /// Processes a single frame, writing the result into the output buffer.
    pub fn execute(&mut self, resources: &mut Resources) -> FrameOutcome {
        let Some(mut output) = resources.remove(&self.descriptor.output) else {
            debug!(
                "Output buffer `{}` is missing; skipping frame",
                self.descriptor.output
            );

            return FrameOutcome::NotReady;
        };

        let outcome = if self.state.is_enabled() {
            self.render(resources, &mut output)
        } else {
            self.bypass(resources, &mut output)
        };

        resources.insert(self.descriptor.output.clone(), output);

        outcome
    }

    fn bypass(
        &self,
        resources: &Resources,
        output: &mut Texture,
    ) -> FrameOutcome {
        match resources.get(&self.descriptor.signal) {
            Some(signal) if signal.size() == output.size() => {
                output.copy_from(signal);
                FrameOutcome::Bypassed
            }

            _ => {
                debug!(
                    "Signal `{}` is missing or mismatched; skipping frame",
                    self.descriptor.signal
                );

                FrameOutcome::NotReady
            }
        }
    }

    fn render(
        &mut self,
        resources: &Resources,
        output: &mut Texture,
    ) -> FrameOutcome {
        let Some(buffers) = &mut self.buffers else {
            debug!("Denoiser has not been resized yet; skipping frame");
            return FrameOutcome::NotReady;
        };

        let inputs = match self.descriptor.resolve(resources, buffers.size) {
            Some(inputs) if output.size() == buffers.size => inputs,

            _ => {
                debug!("Inputs are missing or mismatched; skipping frame");

                return FrameOutcome::NotReady;
            }
        };

        let cleared = self.state == DenoiserState::NeedsClear;

        if cleared {
            buffers.clear();
        }

        let passes = &self.passes;
        let config = &self.config;

        passes.surface_packing.run(&inputs, buffers);
        passes.reprojection.run(config, &inputs, buffers);
        passes.variance_estimation.run(config, buffers);
        passes.atrous.run(config, buffers);
        passes.composition.run(&inputs, buffers, output);

        buffers.prev_depth_normal.copy_from(&buffers.depth_normal);

        self.state = self.state.rendered();
        self.frame += 1;

        FrameOutcome::Denoised { cleared }
    }
}

impl Drop for Denoiser {
    fn drop(&mut self) {
        info!("Deleting denoiser: {}", self.descriptor.output);
    }
}
