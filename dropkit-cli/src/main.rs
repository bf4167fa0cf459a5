//! Developer simulator for the dropkit payment bridge.
//!
//! Drives a complete start → completion → settlement cycle in-process:
//! scripted collaborators stand in for the host application and the external
//! payments SDK, so settlement behavior can be inspected without a device.
//!
//! ```text
//! dropkit --options options.json --completion approved --card \
//!     --device-data fingerprint-123
//! ```

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use dropkit_core::{
    DeviceDataCollector, DeviceDataError, DropInBridge, DropInOptions, FlowCompletion,
    HostSurface, HostSurfaceProvider, LaunchParameters, PaymentMethodToken,
    ThreeDSecureVerification,
};
use eyre::{Result, WrapErr};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dropkit", about = "Simulate a drop-in payment flow end to end")]
struct Args {
    /// JSON file with the drop-in options (camelCase wire keys).
    #[arg(long)]
    options: PathBuf,

    /// Completion the simulated flow reports back.
    #[arg(long, value_enum, default_value_t = CompletionKind::Approved)]
    completion: CompletionKind,

    /// Produce a card token carrying 3-D Secure liability flags.
    #[arg(long)]
    card: bool,

    /// Liability-shift-possible flag on the simulated card token.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    liability_shift_possible: bool,

    /// Liability-shifted flag on the simulated card token.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    liability_shifted: bool,

    /// Message a failing flow reports.
    #[arg(long, default_value = "simulated failure")]
    message: String,

    /// Device data the simulated collector returns; omit to make collection
    /// fail (the payment still settles, without device data).
    #[arg(long)]
    device_data: Option<String>,

    /// Simulate a surface without device-data collection support.
    #[arg(long)]
    no_device_data_support: bool,

    /// Milliseconds the simulated flow takes before completing.
    #[arg(long, default_value_t = 150)]
    flow_delay_ms: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionKind {
    Approved,
    Cancelled,
    Failed,
}

/// What the simulated flow reports back, and how long it takes to do so.
struct ScriptedFlow {
    kind: CompletionKind,
    card: bool,
    liability_shift_possible: bool,
    liability_shifted: bool,
    message: String,
    delay: Duration,
}

impl ScriptedFlow {
    fn completion(&self) -> FlowCompletion {
        match self.kind {
            CompletionKind::Approved => FlowCompletion::Approved {
                token: Some(PaymentMethodToken {
                    nonce: "simulated-nonce".to_owned(),
                    type_label: if self.card {
                        "Visa".to_owned()
                    } else {
                        "PayPal".to_owned()
                    },
                    description: "simulated payment method".to_owned(),
                    is_default: true,
                    three_d_secure: self.card.then(|| ThreeDSecureVerification {
                        liability_shifted: self.liability_shifted,
                        liability_shift_possible: self.liability_shift_possible,
                    }),
                }),
            },
            CompletionKind::Cancelled => FlowCompletion::Cancelled,
            CompletionKind::Failed => FlowCompletion::Failed {
                message: self.message.clone(),
            },
        }
    }
}

/// Surface double that posts the scripted completion back to the bridge
/// after a delay, the way a real host observes the flow finish later.
struct SimulatedSurface {
    bridge: OnceLock<Arc<DropInBridge>>,
    flow: ScriptedFlow,
    supports_collection: bool,
}

impl SimulatedSurface {
    fn attach(&self, bridge: &Arc<DropInBridge>) {
        if self.bridge.set(Arc::clone(bridge)).is_err() {
            tracing::warn!("bridge already attached");
        }
    }
}

impl HostSurface for SimulatedSurface {
    fn launch_payment_flow(&self, parameters: LaunchParameters) {
        tracing::info!(
            request_code = parameters.request_code,
            wallet = parameters.wallet.is_some(),
            vault_manager = parameters.vault_manager_enabled,
            "flow launched"
        );
        let Some(bridge) = self.bridge.get().cloned() else {
            tracing::error!("no bridge attached, dropping launch");
            return;
        };
        let completion = self.flow.completion();
        let delay = self.flow.delay;
        let request_code = parameters.request_code;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            bridge.on_flow_completed(request_code, completion).await;
        });
    }

    fn supports_device_data_collection(&self) -> bool {
        self.supports_collection
    }
}

struct SimulatedProvider {
    surface: Arc<SimulatedSurface>,
}

impl HostSurfaceProvider for SimulatedProvider {
    fn current_surface(&self) -> Option<Arc<dyn HostSurface>> {
        Some(Arc::clone(&self.surface) as Arc<dyn HostSurface>)
    }
}

struct SimulatedCollector {
    device_data: Option<String>,
}

#[async_trait::async_trait]
impl DeviceDataCollector for SimulatedCollector {
    async fn collect_device_data(
        &self,
        _surface: Arc<dyn HostSurface>,
        _credential: String,
    ) -> Result<String, DeviceDataError> {
        self.device_data
            .clone()
            .ok_or_else(|| DeviceDataError::CollectionFailed {
                reason: "simulated collection failure".to_owned(),
            })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let raw = std::fs::read_to_string(&args.options)
        .wrap_err_with(|| format!("reading {}", args.options.display()))?;
    let options: DropInOptions = serde_json::from_str(&raw).wrap_err("parsing options")?;

    let surface = Arc::new(SimulatedSurface {
        bridge: OnceLock::new(),
        flow: ScriptedFlow {
            kind: args.completion,
            card: args.card,
            liability_shift_possible: args.liability_shift_possible,
            liability_shifted: args.liability_shifted,
            message: args.message.clone(),
            delay: Duration::from_millis(args.flow_delay_ms),
        },
        supports_collection: !args.no_device_data_support,
    });
    let provider = Arc::new(SimulatedProvider {
        surface: Arc::clone(&surface),
    });
    let collector = Arc::new(SimulatedCollector {
        device_data: args.device_data.clone(),
    });

    let bridge = DropInBridge::new(provider, collector);
    surface.attach(&bridge);

    match bridge.start(options).await {
        Ok(payment) => {
            let rendered = serde_json::to_string_pretty(&payment).wrap_err("rendering payment")?;
            println!("{rendered}");
            Ok(())
        }
        Err(error) => {
            eprintln!("settlement failed: {error} (code {})", error.code());
            std::process::exit(1);
        }
    }
}
