pub mod axis;
pub mod baseline;
pub mod device;
pub mod reading;

pub use axis::Axis;
pub use baseline::Baseline;
pub use device::DeviceId;
pub use reading::Reading;
