//! Line-oriented relay loop over stdin/stdout.

use tabscout_relay::{BackgroundResponder, ContentResponder, FixedSelection, Relay};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Reads one JSON message per line and prints the reply, or `null` when no
/// responder answered. Malformed lines are logged and skipped.
///
/// # Errors
///
/// Returns an error if stdin cannot be read or a reply cannot be encoded.
pub(crate) async fn run_relay(selection: Option<String>) -> anyhow::Result<()> {
    let relay = Relay::new()
        .with_responder(BackgroundResponder)
        .with_responder(ContentResponder::new(FixedSelection(selection)));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match relay.dispatch_json(line).await {
            Ok(reply) => println!("{}", serde_json::to_string(&reply)?),
            Err(e) => tracing::warn!(error = %e, "skipping relay message"),
        }
    }
    Ok(())
}
