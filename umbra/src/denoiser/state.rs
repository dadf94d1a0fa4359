/// Lifecycle of a [`crate::Denoiser`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenoiserState {
    /// Noisy signal is copied into the output as-is; history is left intact.
    Disabled,

    /// Filter chain runs every frame, reusing the history.
    Enabled,

    /// History got invalidated (by a resize or a configuration change) and
    /// will be cleared before the next frame is filtered.
    NeedsClear,
}

impl DenoiserState {
    pub(crate) fn new(enabled: bool) -> Self {
        if enabled {
            Self::NeedsClear
        } else {
            Self::Disabled
        }
    }

    pub fn is_enabled(self) -> bool {
        self != Self::Disabled
    }

    /// Returns the state after the history got invalidated.
    pub(crate) fn invalidated(self) -> Self {
        match self {
            Self::Disabled => Self::Disabled,
            Self::Enabled | Self::NeedsClear => Self::NeedsClear,
        }
    }

    /// Returns the state after the filter got enabled or disabled.
    pub(crate) fn toggled(self, enabled: bool) -> Self {
        match (self, enabled) {
            (_, false) => Self::Disabled,
            (Self::Disabled, true) => Self::NeedsClear,
            (state, true) => state,
        }
    }

    /// Returns the state after a frame went through the filter chain.
    pub(crate) fn rendered(self) -> Self {
        match self {
            Self::Disabled => Self::Disabled,
            Self::Enabled | Self::NeedsClear => Self::Enabled,
        }
    }
}
