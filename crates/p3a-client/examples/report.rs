//! Formats a single metric sample and prints both records.
//!
//! Reads `p3a.toml` from the working directory if present; set
//! `P3A_REPORTING__STAR_ENABLED=false` and similar variables to override.

use chrono::Utc;
use p3a_client::{ApiError, Channel, MessageMetainfo, Platform, ReportedMessage, start};

fn main() -> Result<(), ApiError> {
    let (mut reporter, _cfg) = start(None)?;

    reporter.subscribe(|msg| match msg {
        ReportedMessage::Json(json) => match json.to_json_string() {
            Ok(body) => println!("json: {}", body),
            Err(e) => eprintln!("json record could not be serialized: {}", e),
        },
        ReportedMessage::Star { payload, .. } => println!("star: {}", payload),
    });

    let platform = Platform::current().unwrap_or(Platform::Linux);
    let mut meta = MessageMetainfo::new(
        platform,
        Channel::Release,
        env!("CARGO_PKG_VERSION"),
        "DE",
        "BRV001",
        Utc::now() - chrono::Duration::weeks(3),
    );
    meta.update_survey(Utc::now());

    reporter.report("Brave.Core.UsageDaily", 1, &meta)?;
    Ok(())
}
