use strum::{Display, EnumString};

/// The environment the app shell runs in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HostPlatform {
    Android,
    Ios,
    Other,
}

impl HostPlatform {
    pub fn current() -> Self {
        if cfg!(target_os = "android") {
            Self::Android
        } else if cfg!(target_os = "ios") {
            Self::Ios
        } else {
            Self::Other
        }
    }
}

/// Whether selecting a stop may push a separate arrivals screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationCapability {
    DetailScreen,
    /// Arrivals are rendered next to the list; selection never navigates.
    InlineOnly,
}

impl NavigationCapability {
    pub fn can_navigate(self) -> bool {
        matches!(self, Self::DetailScreen)
    }
}

impl From<HostPlatform> for NavigationCapability {
    fn from(platform: HostPlatform) -> Self {
        match platform {
            HostPlatform::Android | HostPlatform::Ios => Self::DetailScreen,
            HostPlatform::Other => Self::InlineOnly,
        }
    }
}
