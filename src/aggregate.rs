//! Merge per-station match groups into one ordered table.

use crate::models::FacilityMatch;

/// Concatenate the groups in station input order, sorting each group by
/// ascending distance. The sort is stable, so equidistant matches keep
/// their arrival order. Pure; no I/O.
pub fn aggregate(groups: Vec<Vec<FacilityMatch>>) -> Vec<FacilityMatch> {
    let mut out = Vec::with_capacity(groups.iter().map(Vec::len).sum());
    for mut group in groups {
        group.sort_by(|a, b| a.distance_m.total_cmp(&b.distance_m));
        out.extend(group);
    }
    out
}
