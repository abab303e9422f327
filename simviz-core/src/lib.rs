pub mod error;
pub mod packet;
pub mod pump;
pub mod registry;
pub mod slider;
pub mod store;
pub mod window;

pub use error::{OrderingError, PacketError, StoreError, ValidationError};
pub use layout::OrderingPolicy;
pub use packet::PacketDecoder;
pub use pump::{drain_into, DrainReport};
pub use registry::StoreRegistry;
pub use slider::TimeSlider;
pub use store::{PushOutcome, Sample, TimeSeriesStore};
pub use window::WindowView;
