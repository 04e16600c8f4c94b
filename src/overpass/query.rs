//! Overpass QL construction.

use crate::models::GeoPoint;

/// Escape embedded double quotes in a tag value.
fn escape(value: &str) -> String {
    value.replace('"', "\\\"")
}

/// Union of the administrative region areas, assigned to `.searchArea`.
pub fn region_union(regions: &[String]) -> String {
    let areas: Vec<String> = regions
        .iter()
        .map(|r| {
            format!(
                "  area[\"name\"=\"{}\"][\"boundary\"=\"administrative\"][\"admin_level\"=\"4\"];",
                escape(r)
            )
        })
        .collect();
    format!("(\n{}\n)->.searchArea;", areas.join("\n"))
}

/// Railway stations with the exact given name inside the region union.
/// Returns all matches so that ambiguity is visible to the caller.
pub fn station_query(name: &str, regions: &[String], timeout_secs: u64) -> String {
    let escaped = escape(name);
    format!(
        "[out:json][timeout:{timeout_secs}];\n\
         {}\n\
         (\n\
           node[\"railway\"=\"station\"][\"name\"=\"{escaped}\"](area.searchArea);\n\
           relation[\"railway\"=\"station\"][\"name\"=\"{escaped}\"](area.searchArea);\n\
         );\n\
         out center;",
        region_union(regions)
    )
}

/// Schools (and optionally universities) inside the bounding circle. The
/// server-side name filter mirrors the local classification rule but is
/// advisory; the exact check is repeated locally.
pub fn facility_query(
    center: GeoPoint,
    radius_m: f64,
    include_universities: bool,
    timeout_secs: u64,
) -> String {
    let name_filter = if include_universities {
        "中学校|高等学校|大学"
    } else {
        "中学校|高等学校"
    };
    let around = format!("(around:{:.0},{},{})", radius_m, center.lat, center.lon);

    let body = if include_universities {
        format!(
            "(\n\
               nwr[\"amenity\"=\"school\"][\"name\"~\"{name_filter}\"]{around};\n\
               nwr[\"amenity\"=\"university\"]{around};\n\
             );"
        )
    } else {
        format!("nwr[\"amenity\"=\"school\"][\"name\"~\"{name_filter}\"]{around};")
    };

    format!("[out:json][timeout:{timeout_secs}];\n{body}\nout center;")
}
