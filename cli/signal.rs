use aggrecat_core::CancellationToken;
use anyhow::{Context, Result};

/// Installs a Ctrl-C handler that cancels the returned token so the engine
/// stops at the next batch boundary. A second Ctrl-C exits immediately.
pub fn install_cancel_handler() -> Result<CancellationToken> {
    let token = CancellationToken::new();
    let handler_token = token.clone();
    ctrlc::set_handler(move || {
        if handler_token.is_cancelled() {
            std::process::exit(130);
        }
        eprintln!("Cancellation requested; letting the current batch finish.");
        handler_token.cancel();
    })
    .context("Failed to install Ctrl-C handler")?;
    Ok(token)
}
