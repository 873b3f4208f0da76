//! Device location acquisition
//!
//! Drives [`LocationMachine`] against a platform provider and applies the
//! fix timeout. `detect` takes `&mut self`, so at most one attempt is in
//! flight per flow.

use std::future::Future;

use shared::{
    GeolocationReading, LocationError, LocationMachine, LocationState, PermissionState,
    PositionError, PositionOptions, RawPosition,
};

/// Platform geolocation capability
pub trait GeolocationProvider {
    fn is_supported(&self) -> bool;

    /// Current permission, or `None` when the platform cannot be queried
    fn query_permission(&self) -> impl Future<Output = Option<PermissionState>> + Send;

    fn current_position(
        &self,
        options: PositionOptions,
    ) -> impl Future<Output = Result<RawPosition, PositionError>> + Send;
}

pub struct LocationFlow<P: GeolocationProvider> {
    provider: P,
    options: PositionOptions,
    machine: LocationMachine,
}

impl<P: GeolocationProvider> LocationFlow<P> {
    pub fn new(provider: P, options: PositionOptions) -> Self {
        Self {
            provider,
            options,
            machine: LocationMachine::new(),
        }
    }

    pub fn state(&self) -> &LocationState {
        self.machine.state()
    }

    /// Reading from the most recent successful attempt
    pub fn reading(&self) -> Option<&GeolocationReading> {
        self.machine.reading()
    }

    /// Run one detection attempt from idle. There is no retry.
    pub async fn detect(&mut self) -> Result<GeolocationReading, LocationError> {
        if self.machine.begin(self.provider.is_supported()) {
            let permission = self.provider.query_permission().await;
            tracing::debug!("Location permission: {:?}", permission);

            if self.machine.permission_checked(permission) {
                let fix = tokio::time::timeout(
                    self.options.timeout,
                    self.provider.current_position(self.options),
                )
                .await
                .unwrap_or(Err(PositionError::Timeout));
                self.machine.fix_received(fix);
            }
        }

        match self.machine.outcome() {
            Some(Ok(reading)) => {
                tracing::info!(
                    "Location detected: {:.4}, {:.4}",
                    reading.latitude,
                    reading.longitude
                );
                Ok(reading)
            }
            Some(Err(err)) => {
                tracing::warn!("Location detection failed: {}", err);
                Err(err)
            }
            None => Err(LocationError::Other(format!(
                "detection stopped in state {}",
                self.machine.state().name()
            ))),
        }
    }
}

/// Provider for devices without a GPS: reports a position supplied up front,
/// or no capability at all
#[derive(Debug, Clone, Default)]
pub struct FixedPositionProvider {
    position: Option<RawPosition>,
    permission: Option<PermissionState>,
}

impl FixedPositionProvider {
    pub fn new(position: RawPosition) -> Self {
        Self {
            position: Some(position),
            permission: Some(PermissionState::Granted),
        }
    }

    pub fn unsupported() -> Self {
        Self::default()
    }

    pub fn from_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Self {
        match (latitude, longitude) {
            (None, None) => Self::unsupported(),
            _ => Self::new(RawPosition {
                latitude,
                longitude,
                ..Default::default()
            }),
        }
    }
}

impl GeolocationProvider for FixedPositionProvider {
    fn is_supported(&self) -> bool {
        self.position.is_some()
    }

    async fn query_permission(&self) -> Option<PermissionState> {
        self.permission
    }

    async fn current_position(&self, _options: PositionOptions) -> Result<RawPosition, PositionError> {
        self.position.ok_or(PositionError::PositionUnavailable)
    }
}
