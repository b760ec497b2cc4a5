pub mod accuracy;
pub mod autofire;
pub mod ballistic_damage;
pub mod band;
pub mod blunt;
pub mod burst3;
pub mod chargen;
pub mod hit_location;
pub mod min_arc;
pub mod recovery;
pub mod scatter;

pub use band::{band_index, Band};
