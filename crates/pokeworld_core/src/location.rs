use async_trait::async_trait;

use crate::error::LocationError;
use crate::geo::Coordinate;

/// One-shot position fix supplied by the host.
#[async_trait]
pub trait LocationSource: Send + Sync {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

/// A fix known up front, or none at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedLocation(Option<Coordinate>);

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self(Some(coordinate))
    }

    pub fn unavailable() -> Self {
        Self(None)
    }
}

#[async_trait]
impl LocationSource for FixedLocation {
    async fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        self.0
            .ok_or_else(|| LocationError::Unavailable("no position fix".into()))
    }
}
