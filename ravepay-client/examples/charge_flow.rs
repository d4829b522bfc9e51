//! Charge flow example against the gateway's sandbox.
//!
//! Charges the sandbox test card, answers a PIN suggestion, completes the
//! pending charge with an OTP, then verifies it with the secret key.
//!
//! Run with: cargo run -p ravepay-client --example charge_flow
//!
//! Reads `RAVE_MODE`, `RAVE_PUBLIC_KEY`, `RAVE_SECRET_KEY`, `RAVE_BASE_URL` and `RAVE_OTP`
//! (default `12345`, the sandbox OTP) from the environment or a `.env` file.

use ravepay_client::{Card, ChargeOutcome, ChargeRequest, RaveConfig, build_client};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ravepay_hex=debug,ravepay_client=debug".into()),
        )
        .init();

    let config = RaveConfig::from_env()?;
    tracing::info!("Using {} mode at {}", config.mode, config.base_url());
    let can_verify = config.secret_key.is_some();

    let client = build_client(config)?;

    let mut card = Card {
        card_no: "5438898014560229".into(),
        cvv: "789".into(),
        expiry_month: "09".into(),
        expiry_year: "19".into(),
        currency: "NGN".into(),
        country: "NG".into(),
        ..Default::default()
    };
    let mut req = ChargeRequest::new(300.0, "tester@flutter.co");
    req.ip = Some("103.238.105.185".into());

    // ─────────────────────────────────────────────────────────────────────────
    // Phase one: charge
    // ─────────────────────────────────────────────────────────────────────────

    let mut charge = client.charge(&mut req, &card).await?;
    println!("Charge: {} ({})", charge.status, charge.message);

    if let ChargeOutcome::SuggestedAuth(auth) = charge.outcome() {
        println!("Gateway suggests {auth} auth, retrying");
        card.pin = Some("3310".into());
        req.suggested_auth = Some(auth);
        charge = client.charge(&mut req, &card).await?;
        println!("Charge: {} ({})", charge.status, charge.message);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Phase two: OTP validation
    // ─────────────────────────────────────────────────────────────────────────

    let mut completed = false;
    match charge.outcome() {
        ChargeOutcome::PendingValidation => {
            let otp = std::env::var("RAVE_OTP").unwrap_or_else(|_| "12345".to_string());
            let confirmation = client.validate(&charge, &otp).await?;
            println!(
                "Validation: {} ({})",
                confirmation.status, confirmation.message
            );
            completed = confirmation.is_success();
        }
        ChargeOutcome::Success => {
            println!("Charge completed without validation");
            completed = true;
        }
        ChargeOutcome::SuggestedAuth(auth) => println!("Gateway still wants {auth} auth"),
        ChargeOutcome::Failed { code, message } => {
            println!("Charge failed: {message} ({})", code.unwrap_or_default());
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Verification
    // ─────────────────────────────────────────────────────────────────────────

    match charge.data.flw_ref.as_deref() {
        Some(flw_ref) if completed && can_verify => {
            let verified = client.verify(flw_ref).await?;
            println!(
                "Verified: {} (amount confirmed: {})",
                verified.message,
                verified.confirms(req.amount, "NGN")
            );
        }
        _ => println!("Skipping verification"),
    }

    Ok(())
}
