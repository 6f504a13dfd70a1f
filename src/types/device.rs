use std::fmt;
use std::num::NonZeroU32;

/// Identifier of a monitored device. Zero is not a device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeviceId(NonZeroU32);

impl DeviceId {
    pub fn new(id: u32) -> Option<Self> {
        NonZeroU32::new(id).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_not_a_device() {
        assert!(DeviceId::new(0).is_none());
        assert_eq!(DeviceId::new(7).map(DeviceId::get), Some(7));
    }
}
