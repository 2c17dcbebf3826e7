//! Distance bucketing for incident records
//!
//! Maps the continuous distance-to-incident value onto the discrete,
//! labeled buckets the heatmap dashboards group by. The mapping is a
//! total function: every input, however malformed, lands in exactly one
//! bucket.

use crate::app::models::DistanceBucket;
use crate::constants::DISTANCE_BIN_EDGES_KM;

/// Bucket a distance in kilometers.
///
/// Comparisons are strict `<` against ascending edges, first match wins,
/// so buckets are half-open on the lower end: [0,2), [2,5), [5,10),
/// [10,∞). Non-finite or negative values cannot be distances and map to
/// [`DistanceBucket::Unknown`].
pub fn bucket_km(km: f64) -> DistanceBucket {
    if !km.is_finite() || km < 0.0 {
        return DistanceBucket::Unknown;
    }

    let [two, five, ten] = DISTANCE_BIN_EDGES_KM;
    if km < two {
        DistanceBucket::UnderTwo
    } else if km < five {
        DistanceBucket::TwoToFive
    } else if km < ten {
        DistanceBucket::FiveToTen
    } else {
        DistanceBucket::TenPlus
    }
}

/// Bucket an optional distance; a missing value is `Unknown`
pub fn bucket_optional_km(km: Option<f64>) -> DistanceBucket {
    km.map(bucket_km).unwrap_or(DistanceBucket::Unknown)
}

/// Bucket a raw field value that should represent kilometers; anything
/// unparseable is `Unknown`
pub fn bucket_raw(raw: &str) -> DistanceBucket {
    raw.trim()
        .parse::<f64>()
        .map(bucket_km)
        .unwrap_or(DistanceBucket::Unknown)
}
