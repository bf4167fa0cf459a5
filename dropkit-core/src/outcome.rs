use serde::Serialize;

/// Outcome the host observed when the external flow finished.
///
/// Posted back to the bridge through
/// [`DropInBridge::on_flow_completed`](crate::DropInBridge::on_flow_completed),
/// consumed once.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FlowCompletion {
    /// The flow finished and the external SDK reported approval. A missing
    /// token models the SDK handing back an approved result with no payment
    /// method payload.
    Approved {
        /// The payment method the flow produced, when the SDK supplied one.
        token: Option<PaymentMethodToken>,
    },
    /// The user dismissed the flow.
    Cancelled,
    /// The external flow reported an error of its own.
    Failed {
        /// The flow's error message, the only diagnostic available.
        message: String,
    },
}

/// Payment method produced by an approved flow.
///
/// A token is card-type iff `three_d_secure` is present; only card tokens are
/// subject to the liability-shift rules.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PaymentMethodToken {
    /// One-time reference for the payment method.
    pub nonce: String,
    /// Human-readable type label ("Visa", "PayPal", ...).
    pub type_label: String,
    /// Human-readable description of the payment method.
    pub description: String,
    /// Whether this is the customer's default payment method.
    pub is_default: bool,
    /// 3-D Secure verification outcome, present on card tokens.
    pub three_d_secure: Option<ThreeDSecureVerification>,
}

/// Liability-shift flags reported by the 3-D Secure verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct ThreeDSecureVerification {
    /// Whether liability actually moved to the card issuer.
    pub liability_shifted: bool,
    /// Whether a liability shift is possible for this card at all.
    pub liability_shift_possible: bool,
}

/// The settled payment handed to the caller on success.
///
/// Serializes with the wire key set mobile callers expect: `nonce`, `type`,
/// `description`, `isDefault` and, when collected, `deviceData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResult {
    /// One-time reference for the payment method.
    pub nonce: String,
    /// Human-readable type label.
    #[serde(rename = "type")]
    pub payment_type: String,
    /// Human-readable description of the payment method.
    pub description: String,
    /// Whether this is the customer's default payment method.
    pub is_default: bool,
    /// Device fingerprint, attached best-effort. Absence never blocked the
    /// settlement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_data: Option<String>,
}
