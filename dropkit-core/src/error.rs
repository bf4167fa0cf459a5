use thiserror::Error;

/// Terminal failure delivered to the caller of
/// [`DropInBridge::start`](crate::DropInBridge::start).
///
/// Across the FFI boundary the error is flat: foreign code receives the
/// rendered form, `code` or `code: detail`. [`DropInError::code`] exposes the
/// bare code for callers that keep the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum DropInError {
    /// No merchant credential was supplied.
    #[error("missing_credential")]
    MissingCredential,
    /// The mandatory 3-D Secure section is absent from the options.
    #[error("missing_three_d_secure_configuration")]
    MissingThreeDSecureConfiguration,
    /// The billing address could not be assembled.
    #[error("address_construction_failed: {reason}")]
    AddressConstructionFailed {
        /// What made the address unusable.
        reason: String,
    },
    /// The 3-D Secure request object could not be assembled.
    #[error("three_d_secure_request_failed: {reason}")]
    ThreeDSecureRequestFailed {
        /// What made the request unusable.
        reason: String,
    },
    /// No foreground surface was available to launch the flow into.
    #[error("no_host_surface")]
    NoHostSurface,
    /// A request was already pending and the bridge is configured to reject
    /// overlapping requests.
    #[error("request_already_in_flight")]
    RequestAlreadyInFlight,
    /// A newer request took the pending slot. Delivered to the displaced
    /// caller under [`ReentryPolicy::SupersedePending`](crate::ReentryPolicy).
    #[error("request_superseded")]
    RequestSuperseded,
    /// The user dismissed the flow. An expected terminal outcome, not an
    /// application fault.
    #[error("user_cancellation")]
    UserCancellation,
    /// 3-D Secure liability cannot be shifted for this card.
    #[error("three_d_secure_liability_not_shiftable")]
    LiabilityShiftNotPossible,
    /// 3-D Secure liability was not shifted for this card.
    #[error("three_d_secure_liability_not_shifted")]
    LiabilityNotShifted,
    /// The external flow reported an error of its own. Its message is the
    /// only diagnostic available and doubles as the code.
    #[error("{message}")]
    FlowFailed {
        /// The flow's error message.
        message: String,
    },
    /// The approved flow produced no usable payment method payload.
    #[error("payment_resolution_failed")]
    PaymentResolutionFailed,
    /// The configured result timeout elapsed before the flow completed.
    #[error("timeout")]
    Timeout,
}

impl DropInError {
    /// Stable machine-readable code for this failure.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Self::MissingCredential => "missing_credential".to_owned(),
            Self::MissingThreeDSecureConfiguration => {
                "missing_three_d_secure_configuration".to_owned()
            }
            Self::AddressConstructionFailed { .. } => "address_construction_failed".to_owned(),
            Self::ThreeDSecureRequestFailed { .. } => "three_d_secure_request_failed".to_owned(),
            Self::NoHostSurface => "no_host_surface".to_owned(),
            Self::RequestAlreadyInFlight => "request_already_in_flight".to_owned(),
            Self::RequestSuperseded => "request_superseded".to_owned(),
            Self::UserCancellation => "user_cancellation".to_owned(),
            Self::LiabilityShiftNotPossible => "three_d_secure_liability_not_shiftable".to_owned(),
            Self::LiabilityNotShifted => "three_d_secure_liability_not_shifted".to_owned(),
            Self::FlowFailed { message } => message.clone(),
            Self::PaymentResolutionFailed => "payment_resolution_failed".to_owned(),
            Self::Timeout => "timeout".to_owned(),
        }
    }
}

/// Failure reported by a [`DeviceDataCollector`](crate::DeviceDataCollector).
///
/// Never reaches the paying caller: the bridge collapses every variant to an
/// absent device-data field on the settled payment.
#[derive(Debug, Clone, PartialEq, Eq, Error, uniffi::Error)]
pub enum DeviceDataError {
    /// The collector rejected its input before collection started.
    #[error("invalid_argument: {reason}")]
    InvalidArgument {
        /// What the collector objected to.
        reason: String,
    },
    /// Collection started and subsequently failed.
    #[error("collection_failed: {reason}")]
    CollectionFailed {
        /// Why collection failed.
        reason: String,
    },
    /// The foreign collector failed in a way the bindings could not type.
    #[error("unexpected uniffi callback error: {reason}")]
    UnexpectedUniFfiCallbackError {
        /// What the binding layer reported.
        reason: String,
    },
}

impl From<uniffi::UnexpectedUniFFICallbackError> for DeviceDataError {
    fn from(error: uniffi::UnexpectedUniFFICallbackError) -> Self {
        Self::UnexpectedUniFfiCallbackError {
            reason: error.reason,
        }
    }
}
