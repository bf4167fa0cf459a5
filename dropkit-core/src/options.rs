use serde::{Deserialize, Serialize};

/// Caller-supplied configuration for one drop-in payment flow.
///
/// The serde representation uses the camelCase key set mobile integrations
/// pass over the wire (`credential`, `disableVaultManager`, `threeDSecure`,
/// `currencyCode`, `walletMerchantId`), so an options payload can be handed
/// in as JSON unchanged:
///
/// ```
/// use dropkit_core::DropInOptions;
///
/// let options: DropInOptions = serde_json::from_str(
///     r#"{ "credential": "sandbox_token", "currencyCode": "USD" }"#,
/// ).unwrap();
/// assert_eq!(options.credential.as_deref(), Some("sandbox_token"));
/// assert!(options.three_d_secure.is_none());
/// ```
///
/// `credential` and `three_d_secure` are required for a flow to launch;
/// their absence is a validation failure, never a parse failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct DropInOptions {
    /// Merchant client credential used to launch the flow and, later, to
    /// collect device data.
    #[serde(default)]
    #[uniffi(default = None)]
    pub credential: Option<String>,
    /// Disables the vault manager in the drop-in UI. Absent means the vault
    /// manager stays enabled.
    #[serde(default)]
    #[uniffi(default = None)]
    pub disable_vault_manager: Option<bool>,
    /// Mandatory 3-D Secure verification parameters.
    #[serde(default)]
    #[uniffi(default = None)]
    pub three_d_secure: Option<ThreeDSecureOptions>,
    /// ISO 4217 currency code for the optional wallet payment path.
    #[serde(default)]
    #[uniffi(default = None)]
    pub currency_code: Option<String>,
    /// Wallet merchant id. The literal `"test"` selects the TEST wallet
    /// environment; any other value selects PRODUCTION.
    #[serde(default)]
    #[uniffi(default = None)]
    pub wallet_merchant_id: Option<String>,
}

/// Cardholder and transaction details for the 3-D Secure verification.
///
/// Every field is required for request assembly to succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
#[serde(rename_all = "camelCase")]
pub struct ThreeDSecureOptions {
    /// Cardholder given name.
    pub first_name: String,
    /// Cardholder surname.
    pub last_name: String,
    /// Cardholder phone number.
    pub phone_number: String,
    /// Billing street address.
    pub street_address: String,
    /// Extended address line (apartment, suite).
    pub street_address2: String,
    /// Billing city.
    pub city: String,
    /// Billing region or state.
    pub region: String,
    /// Billing postal code.
    pub postal_code: String,
    /// Billing country, ISO 3166-1 alpha-2.
    pub country_code: String,
    /// Transaction amount, a positive decimal string.
    pub amount: String,
    /// Cardholder email address.
    pub email: String,
}
