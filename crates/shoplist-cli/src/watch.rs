//! `watch`: feed stdin positions through a location subscription.

use std::sync::Arc;

use clap::Args;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use shoplist_core::{AppConfig, LocationData};
use shoplist_locator::{
    build_catalog, location_channel, LocationFeed, NearbyStoresTracker, NearbyUpdate, StoreFinder,
};
use shoplist_settings::{KeyValueStorage, SettingsRepository};

use crate::commands::{print_json, wanted_items};

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Item to look for; repeat for several.
    #[arg(long = "item")]
    pub items: Vec<String>,
}

/// Parse a `lat,lon` line. Surrounding whitespace is ignored.
fn parse_position(line: &str) -> Option<(f64, f64)> {
    let (lat, lon) = line.trim().split_once(',')?;
    Some((lat.trim().parse().ok()?, lon.trim().parse().ok()?))
}

/// Publish every `lat,lon` line of `input` to `feed` until EOF.
///
/// Lines that do not parse are skipped with a warning; a read error stops
/// the feed and is returned.
async fn publish_positions<R>(input: R, feed: &LocationFeed) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return Ok(()),
            Err(error) => {
                tracing::error!(%error, "failed to read position from stdin");
                return Err(anyhow::Error::new(error).context("reading positions from stdin"));
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_position(&line) {
            Some((lat, lon)) => feed.publish(LocationData::now(lat, lon, 0.0)),
            None => tracing::warn!(line = %line, "expected `lat,lon`; skipping"),
        }
    }
}

pub async fn run<S: KeyValueStorage>(
    args: WatchArgs,
    config: &AppConfig,
    settings: Arc<SettingsRepository<S>>,
) -> anyhow::Result<()> {
    let mut tracker = NearbyStoresTracker::new(StoreFinder::new(build_catalog(config)?), settings);
    tracker.set_wanted_items(wanted_items(&args.items)?);

    let (feed, mut subscription) = location_channel();
    let reader = tokio::spawn(async move {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        // Dropping the feed ends the subscription after its last value.
        publish_positions(stdin, &feed).await
    });

    while let Some(update) = tracker.next_update(&mut subscription).await {
        match update {
            Ok(NearbyUpdate::Stores { location, stores }) => {
                tracing::info!(
                    latitude = location.latitude,
                    longitude = location.longitude,
                    count = stores.len(),
                    "nearby stores updated"
                );
                print_json(&stores)?;
            }
            Ok(NearbyUpdate::SharingDisabled) => {
                tracing::info!("location sharing disabled; update ignored");
            }
            Ok(NearbyUpdate::LocationError(error)) => {
                eprintln!("location error {}: {error}", error.code());
            }
            Err(error) if error.is_fetch_failure() => {
                eprintln!("failed to fetch nearby stores: {error}");
            }
            Err(error) => {
                eprintln!("{error}");
            }
        }
    }

    reader.await??;
    Ok(())
}
