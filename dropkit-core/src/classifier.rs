//! Pure classification of a finished flow into a resolvable token or a typed
//! rejection. No side effects; the liability rules live here and nowhere else.

use crate::error::DropInError;
use crate::outcome::{FlowCompletion, PaymentMethodToken};

/// What the correlator must do with a finished flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// Proceed to device-data collection and settle successfully.
    Resolve(PaymentMethodToken),
    /// Settle the caller with this failure; any token is discarded.
    Reject(DropInError),
}

/// Maps a completion to its verdict.
///
/// A card token is accepted only when a liability shift is both possible and
/// actually granted; shiftability is checked first, so an unshiftable card is
/// rejected as such regardless of the shifted flag. Non-card tokens skip the
/// check entirely.
pub(crate) fn classify(completion: FlowCompletion) -> Verdict {
    match completion {
        FlowCompletion::Approved { token: None } => {
            Verdict::Reject(DropInError::PaymentResolutionFailed)
        }
        FlowCompletion::Approved { token: Some(token) } => match token.three_d_secure {
            Some(verification) if !verification.liability_shift_possible => {
                Verdict::Reject(DropInError::LiabilityShiftNotPossible)
            }
            Some(verification) if !verification.liability_shifted => {
                Verdict::Reject(DropInError::LiabilityNotShifted)
            }
            _ => Verdict::Resolve(token),
        },
        FlowCompletion::Cancelled => Verdict::Reject(DropInError::UserCancellation),
        FlowCompletion::Failed { message } => Verdict::Reject(DropInError::FlowFailed { message }),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::outcome::ThreeDSecureVerification;

    fn card_token(liability_shift_possible: bool, liability_shifted: bool) -> PaymentMethodToken {
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

    fn wallet_token() -> PaymentMethodToken {
        PaymentMethodToken {
            nonce: "wallet-nonce".to_owned(),
            type_label: "PayPal".to_owned(),
            description: "ada@example.com".to_owned(),
            is_default: false,
            three_d_secure: None,
        }
    }

    #[test_case(false, false ; "shift impossible and not shifted")]
    #[test_case(false, true ; "shift impossible even though shifted flag is set")]
    fn unshiftable_card_is_rejected_regardless_of_shifted_flag(
        liability_shift_possible: bool,
        liability_shifted: bool,
    ) {
        let verdict = classify(FlowCompletion::Approved {
            token: Some(card_token(liability_shift_possible, liability_shifted)),
        });
        assert_eq!(
            verdict,
            Verdict::Reject(DropInError::LiabilityShiftNotPossible)
        );
    }

    #[test]
    fn shiftable_but_unshifted_card_is_rejected() {
        let verdict = classify(FlowCompletion::Approved {
            token: Some(card_token(true, false)),
        });
        assert_eq!(verdict, Verdict::Reject(DropInError::LiabilityNotShifted));
    }

    #[test]
    fn fully_shifted_card_resolves() {
        let token = card_token(true, true);
        let verdict = classify(FlowCompletion::Approved {
            token: Some(token.clone()),
        });
        assert_eq!(verdict, Verdict::Resolve(token));
    }

    #[test]
    fn non_card_token_skips_the_liability_check() {
        let token = wallet_token();
        let verdict = classify(FlowCompletion::Approved {
            token: Some(token.clone()),
        });
        assert_eq!(verdict, Verdict::Resolve(token));
    }

    #[test]
    fn approval_without_a_token_fails_resolution() {
        let verdict = classify(FlowCompletion::Approved { token: None });
        assert_eq!(verdict, Verdict::Reject(DropInError::PaymentResolutionFailed));
    }

    #[test]
    fn cancellation_is_a_typed_rejection() {
        assert_eq!(
            classify(FlowCompletion::Cancelled),
            Verdict::Reject(DropInError::UserCancellation)
        );
    }

    #[test]
    fn flow_failure_passes_the_message_through() {
        let verdict = classify(FlowCompletion::Failed {
            message: "processor unreachable".to_owned(),
        });
        assert_eq!(
            verdict,
            Verdict::Reject(DropInError::FlowFailed {
                message: "processor unreachable".to_owned(),
            })
        );
    }
}
