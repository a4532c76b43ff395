//! Static market data: nearby competitors and neighborhood targeting.
//!
//! Neighborhood targets are turned into map circles (position offset per
//! row, radius scaled by pre-1980 housing stock, color by income band) and can
//! be exported as GeoJSON for whatever map layer presents them.

use serde::Serialize;
use serde_json::{Value, json};

/// Initial map center (downtown Miami), latitude/longitude.
pub const MAP_CENTER: (f64, f64) = (25.7617, -80.1918);
pub const MAP_ZOOM: u8 = 10;

/// Origin of the first target circle; each later neighborhood is offset by
/// [`CIRCLE_STEP_DEG`] in both latitude and longitude.
const CIRCLE_ORIGIN: (f64, f64) = (25.76, -80.19);
const CIRCLE_STEP_DEG: f64 = 0.01;
/// Meters of radius per pre-1980 home.
const RADIUS_PER_HOME_M: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Competitor {
    pub name: String,
    pub rating: f32,
    pub years_in_business: u32,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Neighborhood {
    pub name: String,
    pub pre_1980_homes: u32,
    pub high_income: bool,
    pub recent_sales: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleColor {
    Green,
    Orange,
}

impl CircleColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
        }
    }
}

/// A filled map circle marking one target neighborhood.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetCircle {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: f64,
    pub color: CircleColor,
}

/// Flooring contractors competing in the same market.
pub fn competitors() -> Vec<Competitor> {
    [
        ("ABC Floors", 4.5, 8, "Miami, FL"),
        ("Miami Tile Co", 3.8, 5, "Fort Lauderdale, FL"),
        ("Luxury Plank Pro", 4.9, 12, "Weston, FL"),
    ]
    .into_iter()
    .map(|(name, rating, years, address)| Competitor {
        name: name.to_string(),
        rating,
        years_in_business: years,
        address: address.to_string(),
    })
    .collect()
}

/// Neighborhoods with older housing stock and recent sales activity.
pub fn neighborhoods() -> Vec<Neighborhood> {
    [
        ("Coral Gables", 1200, true, 25),
        ("Pinecrest", 950, true, 18),
        ("Weston", 300, true, 20),
        ("Plantation", 700, false, 15),
    ]
    .into_iter()
    .map(|(name, homes, high_income, sales)| Neighborhood {
        name: name.to_string(),
        pre_1980_homes: homes,
        high_income,
        recent_sales: sales,
    })
    .collect()
}

/// Map each neighborhood to a circle, offsetting position by row index.
pub fn target_circles(areas: &[Neighborhood]) -> Vec<TargetCircle> {
    areas
        .iter()
        .enumerate()
        .map(|(i, area)| {
            let offset = CIRCLE_STEP_DEG * i as f64;
            TargetCircle {
                label: area.name.clone(),
                latitude: CIRCLE_ORIGIN.0 + offset,
                longitude: CIRCLE_ORIGIN.1 + offset,
                radius_m: f64::from(area.pre_1980_homes) * RADIUS_PER_HOME_M,
                color: if area.high_income {
                    CircleColor::Green
                } else {
                    CircleColor::Orange
                },
            }
        })
        .collect()
}

/// GeoJSON `FeatureCollection` of point features carrying circle styling.
///
/// GeoJSON has no circle geometry; renderers draw `radius` (meters) around
/// each point.
pub fn circles_to_geojson(circles: &[TargetCircle]) -> Value {
    let features: Vec<Value> = circles
        .iter()
        .map(|c| {
            json!({
                "type": "Feature",
                "geometry": {
                    "type": "Point",
                    "coordinates": [c.longitude, c.latitude],
                },
                "properties": {
                    "name": c.label,
                    "radius": c.radius_m,
                    "color": c.color.as_str(),
                    "fill": true,
                },
            })
        })
        .collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn competitor_table() {
        let rows = competitors();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2].name, "Luxury Plank Pro");
        assert_eq!(rows[2].years_in_business, 12);
    }

    #[test]
    fn circles_offset_by_row() {
        let circles = target_circles(&neighborhoods());
        assert_eq!(circles.len(), 4);

        let first = &circles[0];
        assert_eq!(first.label, "Coral Gables");
        assert!(close(first.latitude, 25.76));
        assert!(close(first.longitude, -80.19));
        assert!(close(first.radius_m, 2400.0));
        assert_eq!(first.color, CircleColor::Green);

        let last = &circles[3];
        assert_eq!(last.label, "Plantation");
        assert!(close(last.latitude, 25.79));
        assert!(close(last.longitude, -80.16));
        assert!(close(last.radius_m, 1400.0));
        assert_eq!(last.color, CircleColor::Orange);
    }

    #[test]
    fn no_neighborhoods_no_circles() {
        assert!(target_circles(&[]).is_empty());
    }

    #[test]
    fn geojson_uses_lon_lat_order() {
        let circles = target_circles(&neighborhoods()[..1]);
        let geo = circles_to_geojson(&circles);
        assert_eq!(geo["type"], "FeatureCollection");
        let feature = &geo["features"][0];
        let coords = feature["geometry"]["coordinates"].as_array().unwrap();
        assert!(close(coords[0].as_f64().unwrap(), -80.19));
        assert!(close(coords[1].as_f64().unwrap(), 25.76));
        assert_eq!(feature["properties"]["color"], "green");
    }
}
