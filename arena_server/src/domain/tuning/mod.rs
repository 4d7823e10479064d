pub mod round;

pub use round::RoundTuning;
