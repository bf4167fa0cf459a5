use std::str::FromStr;

use rust_decimal::Decimal;
use strum::Display;

use crate::error::DropInError;
use crate::options::{DropInOptions, ThreeDSecureOptions};

/// Result-channel key the host must echo back when posting the flow's
/// completion. Events carrying any other code are ignored by the bridge.
pub const PAYMENT_FLOW_REQUEST_CODE: i32 = 0x444;

/// Wallet environment the optional wallet payment path runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, uniffi::Enum)]
#[strum(serialize_all = "UPPERCASE")]
pub enum WalletEnvironment {
    /// Sandbox environment, selected by the reserved merchant id `"test"`.
    Test,
    /// Live environment, selected by every other merchant id.
    Production,
}

impl WalletEnvironment {
    /// Selects the environment from the wallet merchant id.
    #[must_use]
    pub fn from_merchant_id(merchant_id: &str) -> Self {
        if merchant_id == "test" {
            Self::Test
        } else {
            Self::Production
        }
    }
}

/// Billing address attached to the 3-D Secure request.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PostalAddress {
    /// Cardholder given name.
    pub given_name: String,
    /// Cardholder surname.
    pub surname: String,
    /// Cardholder phone number.
    pub phone_number: String,
    /// Street address.
    pub street_address: String,
    /// Extended address line.
    pub extended_address: String,
    /// City.
    pub locality: String,
    /// Region or state.
    pub region: String,
    /// Postal code.
    pub postal_code: String,
    /// Country, ISO 3166-1 alpha-2, uppercased.
    pub country_code_alpha2: String,
}

impl PostalAddress {
    fn from_options(options: &ThreeDSecureOptions) -> Result<Self, DropInError> {
        let country = options.country_code.trim();
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DropInError::AddressConstructionFailed {
                reason: format!("country code `{country}` is not ISO 3166-1 alpha-2"),
            });
        }
        Ok(Self {
            given_name: options.first_name.clone(),
            surname: options.last_name.clone(),
            phone_number: options.phone_number.clone(),
            street_address: options.street_address.clone(),
            extended_address: options.street_address2.clone(),
            locality: options.city.clone(),
            region: options.region.clone(),
            postal_code: options.postal_code.clone(),
            country_code_alpha2: country.to_ascii_uppercase(),
        })
    }
}

/// 3-D Secure protocol version requested from the external SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ThreeDSecureVersion {
    /// Legacy 3-D Secure 1.x.
    V1,
    /// 3-D Secure 2.x, the version this bridge always requests.
    V2,
}

/// Assembled 3-D Secure verification request.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ThreeDSecureParameters {
    /// Transaction amount as a decimal string.
    pub amount: String,
    /// Cardholder email address.
    pub email: String,
    /// Billing address, also supplied as additional shipping information.
    pub billing_address: PostalAddress,
    /// Protocol version requested.
    pub version: ThreeDSecureVersion,
}

impl ThreeDSecureParameters {
    fn from_options(
        options: &ThreeDSecureOptions,
        billing_address: PostalAddress,
    ) -> Result<Self, DropInError> {
        let amount = options.amount.trim();
        let parsed = Decimal::from_str(amount).map_err(|error| {
            DropInError::ThreeDSecureRequestFailed {
                reason: format!("amount `{amount}` is not a decimal number: {error}"),
            }
        })?;
        if parsed <= Decimal::ZERO {
            return Err(DropInError::ThreeDSecureRequestFailed {
                reason: format!("amount `{amount}` must be positive"),
            });
        }
        let email = options.email.trim();
        let usable_email = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !usable_email {
            return Err(DropInError::ThreeDSecureRequestFailed {
                reason: format!("email `{email}` is not an address"),
            });
        }
        Ok(Self {
            amount: amount.to_owned(),
            email: email.to_owned(),
            billing_address,
            version: ThreeDSecureVersion::V2,
        })
    }
}

/// Price finality reported to the wallet sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum WalletPriceStatus {
    /// The total may still change.
    Estimated,
    /// The total is final. The drop-in flow always charges a final total.
    Final,
}

/// Optional wallet (Google Pay style) configuration attached to the launch.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct WalletConfiguration {
    /// Wallet merchant id.
    pub merchant_id: String,
    /// ISO 4217 currency code, uppercased.
    pub currency_code: String,
    /// Total price charged, mirrors the 3-D Secure amount.
    pub total_price: String,
    /// Price finality, always [`WalletPriceStatus::Final`] here.
    pub price_status: WalletPriceStatus,
    /// The wallet sheet must collect a billing address.
    pub billing_address_required: bool,
    /// Environment selected from the merchant id.
    pub environment: WalletEnvironment,
}

/// Validated parameters handed to
/// [`HostSurface::launch_payment_flow`](crate::HostSurface::launch_payment_flow).
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct LaunchParameters {
    /// Merchant client credential.
    pub credential: String,
    /// Whether the drop-in UI shows the vault manager.
    pub vault_manager_enabled: bool,
    /// Mandatory 3-D Secure verification request.
    pub three_d_secure: ThreeDSecureParameters,
    /// Wallet payment configuration, attached best-effort.
    pub wallet: Option<WalletConfiguration>,
    /// Always [`PAYMENT_FLOW_REQUEST_CODE`]; the host echoes it back with the
    /// completion.
    pub request_code: i32,
}

impl LaunchParameters {
    /// Validates `options` and assembles the flow's launch parameters.
    ///
    /// Pure transformation. 3-D Secure misconfiguration fails hard; wallet
    /// misconfiguration degrades silently to a launch without wallet support,
    /// because the wallet path is an optional convenience while 3-D Secure is
    /// required for liability protection.
    ///
    /// # Errors
    ///
    /// [`DropInError::MissingCredential`] without a credential,
    /// [`DropInError::MissingThreeDSecureConfiguration`] without the 3-D
    /// Secure section, [`DropInError::AddressConstructionFailed`] for an
    /// unusable billing address and
    /// [`DropInError::ThreeDSecureRequestFailed`] for an unusable amount or
    /// email.
    pub fn from_options(options: &DropInOptions) -> Result<Self, DropInError> {
        let credential = options
            .credential
            .clone()
            .ok_or(DropInError::MissingCredential)?;
        let three_d_secure_options = options
            .three_d_secure
            .as_ref()
            .ok_or(DropInError::MissingThreeDSecureConfiguration)?;
        let billing_address = PostalAddress::from_options(three_d_secure_options)?;
        let three_d_secure =
            ThreeDSecureParameters::from_options(three_d_secure_options, billing_address)?;
        let wallet = build_wallet_configuration(options, &three_d_secure.amount);
        Ok(Self {
            credential,
            vault_manager_enabled: !options.disable_vault_manager.unwrap_or(false),
            three_d_secure,
            wallet,
            request_code: PAYMENT_FLOW_REQUEST_CODE,
        })
    }
}

/// Attached only when merchant id, currency code and amount are all present;
/// a malformed currency code is logged and degrades to no wallet support.
fn build_wallet_configuration(
    options: &DropInOptions,
    amount: &str,
) -> Option<WalletConfiguration> {
    let merchant_id = options.wallet_merchant_id.as_deref()?;
    let currency = options.currency_code.as_deref()?.trim();
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
        log::warn!("wallet payments unavailable: currency code `{currency}` is not ISO 4217");
        return None;
    }
    Some(WalletConfiguration {
        merchant_id: merchant_id.to_owned(),
        currency_code: currency.to_ascii_uppercase(),
        total_price: amount.to_owned(),
        price_status: WalletPriceStatus::Final,
        billing_address_required: true,
        environment: WalletEnvironment::from_merchant_id(merchant_id),
    })
}
