pub mod assessment;
pub mod gauges;
pub mod selection;
