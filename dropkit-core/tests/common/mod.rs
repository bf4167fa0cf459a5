//! In-process collaborator doubles and fixtures shared across integration
//! tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use dropkit_core::{
    DeviceDataCollector, DeviceDataError, DropInOptions, HostSurface, HostSurfaceProvider,
    LaunchParameters, PaymentMethodToken, ThreeDSecureOptions, ThreeDSecureVerification,
};

/// Surface double recording every launch request.
pub struct RecordingSurface {
    launches: Mutex<Vec<LaunchParameters>>,
    supports_collection: bool,
}

impl RecordingSurface {
    pub fn new(supports_collection: bool) -> Arc<Self> {
        Arc::new(Self {
            launches: Mutex::new(Vec::new()),
            supports_collection,
        })
    }

    pub fn launch_count(&self) -> usize {
        self.launches.lock().unwrap().len()
    }

    pub fn last_launch(&self) -> Option<LaunchParameters> {
        self.launches.lock().unwrap().last().cloned()
    }
}

impl HostSurface for RecordingSurface {
    fn launch_payment_flow(&self, parameters: LaunchParameters) {
        self.launches.lock().unwrap().push(parameters);
    }

    fn supports_device_data_collection(&self) -> bool {
        self.supports_collection
    }
}

/// Waits until the surface has seen `count` launches. A launch is recorded
/// only after the pending slot is filled, so observing it makes posting a
/// completion safe.
pub async fn wait_for_launches(surface: &RecordingSurface, count: usize) {
    for _ in 0..400 {
        if surface.launch_count() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("timed out waiting for {count} launch(es)");
}

/// Provider double handing out a fixed surface, or none at all.
pub struct FixedProvider {
    surface: Option<Arc<RecordingSurface>>,
}

impl FixedProvider {
    pub fn with_surface(surface: &Arc<RecordingSurface>) -> Arc<Self> {
        Arc::new(Self {
            surface: Some(Arc::clone(surface)),
        })
    }

    pub fn without_surface() -> Arc<Self> {
        Arc::new(Self { surface: None })
    }
}

impl HostSurfaceProvider for FixedProvider {
    fn current_surface(&self) -> Option<Arc<dyn HostSurface>> {
        self.surface
            .clone()
            .map(|surface| surface as Arc<dyn HostSurface>)
    }
}

/// Collector double with a scripted reply, an optional delay, and a call
/// counter.
pub struct ScriptedCollector {
    reply: Result<String, DeviceDataError>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedCollector {
    pub fn succeeding(device_data: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(device_data.to_owned()),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: Err(DeviceDataError::InvalidArgument {
                reason: "scripted failure".to_owned(),
            }),
            delay: None,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn stalling(device_data: &str, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(device_data.to_owned()),
            delay: Some(delay),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl DeviceDataCollector for ScriptedCollector {
    async fn collect_device_data(
        &self,
        _surface: Arc<dyn HostSurface>,
        _credential: String,
    ) -> Result<String, DeviceDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.reply.clone()
    }
}

pub fn three_d_secure_options() -> ThreeDSecureOptions {
    ThreeDSecureOptions {
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        phone_number: "+33123456789".to_owned(),
        street_address: "12 Rue de la Paix".to_owned(),
        street_address2: String::new(),
        city: "Paris".to_owned(),
        region: "IDF".to_owned(),
        postal_code: "75002".to_owned(),
        country_code: "FR".to_owned(),
        amount: "49.99".to_owned(),
        email: "ada@example.com".to_owned(),
    }
}

pub fn valid_options() -> DropInOptions {
    DropInOptions {
        credential: Some("sandbox_abc123".to_owned()),
        disable_vault_manager: None,
        three_d_secure: Some(three_d_secure_options()),
        currency_code: Some("USD".to_owned()),
        wallet_merchant_id: Some("test".to_owned()),
    }
}

pub fn card_token(liability_shift_possible: bool, liability_shifted: bool) -> PaymentMethodToken {
    PaymentMethodToken {
        nonce: "card-nonce".to_owned(),
        type_label: "Visa".to_owned(),
        description: "ending in 11".to_owned(),
        is_default: true,
        three_d_secure: Some(ThreeDSecureVerification {
            liability_shifted,
            liability_shift_possible,
        }),
    }
}

pub fn wallet_token() -> PaymentMethodToken {
    PaymentMethodToken {
        nonce: "wallet-nonce".to_owned(),
        type_label: "PayPal".to_owned(),
        description: "ada@example.com".to_owned(),
        is_default: false,
        three_d_secure: None,
    }
}
