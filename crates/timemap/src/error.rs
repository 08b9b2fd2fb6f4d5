use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TimeMapError {
    /// Two-point solve with coincident local timestamps; the scale would be
    /// infinite or undefined.
    #[error("degenerate local interval: local_start == local_end == {local}")]
    DegenerateInterval { local: f64 },

    /// A map with zero scale cannot be inverted.
    #[error("time map has zero scale and cannot be inverted")]
    ZeroScale,
}

pub type TimeMapResult<T> = Result<T, TimeMapError>;
