use crate::enrich::places::PlaceLookup;
use crate::model::{BusinessRecord, EnrichedRecord, PlaceResult};

use std::collections::HashSet;
use tracing::{debug, info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EnrichStats {
    pub lookups: usize,
    pub misses: usize,
    pub skipped_known_bad: usize,
}

pub fn build_query(record: &BusinessRecord) -> String {
    format!("{} {} {}", record.title, record.address, record.neighborhood)
}

/// Looks up every record in order. A query that fails or finds nothing gets
/// the sentinel place and is added to `bad_queries`; exact repeats of it are
/// not sent again.
pub fn enrich_records<L: PlaceLookup>(
    lookup: &L,
    records: &[BusinessRecord],
    bad_queries: &mut HashSet<String>,
) -> (Vec<EnrichedRecord>, EnrichStats) {
    let mut stats = EnrichStats::default();
    let mut out = Vec::with_capacity(records.len());

    for record in records {
        let query = build_query(record);

        let place = if bad_queries.contains(&query) {
            debug!("known bad query, skipping lookup: {}", query);
            stats.skipped_known_bad += 1;
            PlaceResult::default()
        } else {
            stats.lookups += 1;
            match lookup.lookup(&query) {
                Ok(Some(place)) => {
                    debug!(
                        "{} -> {}",
                        query,
                        place.formatted_address.as_deref().unwrap_or("?")
                    );
                    place
                }
                Ok(None) => PlaceResult::default(),
                Err(e) => {
                    warn!("Lookup failed for {}: {}", query, e);
                    PlaceResult::default()
                }
            }
        };

        if place.is_sentinel() && bad_queries.insert(query.clone()) {
            stats.misses += 1;
        }

        out.push(EnrichedRecord {
            record: record.clone(),
            place,
            query,
        });
    }

    info!(
        "Enriched {} rows: {} lookups, {} without result, {} known-bad skipped",
        out.len(),
        stats.lookups,
        stats.misses,
        stats.skipped_known_bad
    );
    (out, stats)
}
