pub mod normalize;
pub mod quantity;

pub use normalize::normalize_oil_name;
pub use quantity::{base_quantity, is_not_counted, normalize_ml, oil_volume_ml, parse_percent};
