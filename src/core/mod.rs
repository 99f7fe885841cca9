pub mod primitives;
pub mod scale;
pub mod types;

pub use scale::{LinearScale, PointScale, Scale, TimeScale};
pub use types::{DomainValue, Viewport};
