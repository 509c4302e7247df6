//! RydrVault storefront shell
//!
//! Terminal front end for the phone-number login flow: enter a number, enter
//! the code the (mocked) OTP backend sent, land on the home screen.

use anyhow::{Context, Result};

use rv_core::{SessionServiceConfig, SessionStateMachine};
use rv_shared::config::{AppConfig, Environment};

mod logging;
mod shell;

#[tokio::main]
async fn main() -> Result<()> {
    // Precedence: process variables, then .env.<environment>, then .env.
    // The environment itself may be named in .env, so peek at it unloaded.
    let dotenv_entries = dotenvy::dotenv_iter().into_iter().flatten().flatten();
    let environment = Environment::detect(dotenv_entries);
    dotenvy::from_filename(environment.env_file()).ok();
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    logging::init(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        provider = %config.gateway.provider,
        "Starting RydrVault shell"
    );
    if config.environment.is_production() && config.gateway.provider == "mock" {
        tracing::warn!("Running the mock OTP gateway in production");
    }

    let gateway = rv_infra::create_otp_gateway(&config.gateway, &config.session)
        .context("Failed to initialize OTP gateway")?;
    let machine = SessionStateMachine::new(gateway, SessionServiceConfig::from(&config.session));

    shell::Shell::new(machine, config.session.resend_countdown_secs)
        .run()
        .await
}
