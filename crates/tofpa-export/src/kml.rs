//! KML placemark for a generated surface.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use quick_xml::escape::escape;
use tofpa_core::{GeoPoint, LocalFrame, Surface, SURFACE_ID, SURFACE_NAME};

use crate::error::{ExportError, Result};

/// Polygon symbology, RGBA components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacemarkStyle {
    pub fill_rgba: [u8; 4],
    pub outline_rgba: [u8; 4],
    pub outline_width: f64,
}

impl Default for PlacemarkStyle {
    fn default() -> Self {
        Self {
            // grey at 40% opacity with a thin black outline
            fill_rgba: [128, 128, 128, 102],
            outline_rgba: [0, 0, 0, 255],
            outline_width: 0.5,
        }
    }
}

/// KML colours are written alpha first, then blue, green, red.
fn kml_color([r, g, b, a]: [u8; 4]) -> String {
    format!("{a:02x}{b:02x}{g:02x}{r:02x}")
}

/// One polygon feature with the numeric inputs that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Placemark {
    pub name: String,
    pub feature_id: u32,
    pub attributes: Vec<(String, f64)>,
    /// Closed outer boundary, first vertex repeated last.
    pub boundary: Vec<GeoPoint>,
    pub style: PlacemarkStyle,
    pub generated_at: DateTime<Utc>,
}

impl Placemark {
    /// Georeference `surface` through `frame` and attach its inputs as attributes.
    pub fn from_surface(surface: &Surface, frame: &LocalFrame) -> Result<Self> {
        let mut boundary = Vec::with_capacity(7);
        for (index, vertex) in surface.closed_ring().into_iter().enumerate() {
            let geo = frame.to_geo(vertex);
            if !(geo.lon.is_finite() && geo.lat.is_finite() && geo.alt.is_finite()) {
                return Err(ExportError::InvalidCoordinate { index });
            }
            boundary.push(geo);
        }

        let params = &surface.params;
        let attributes = vec![
            ("initial_width".to_string(), params.initial_width),
            ("max_width".to_string(), params.max_width),
            ("clearway_length".to_string(), params.clearway_length),
            ("start_elevation".to_string(), params.start_elevation),
            ("end_elevation".to_string(), params.end_elevation),
            ("azimuth".to_string(), surface.azimuth),
        ];

        Ok(Self {
            name: SURFACE_NAME.to_string(),
            feature_id: SURFACE_ID,
            attributes,
            boundary,
            style: PlacemarkStyle::default(),
            generated_at: Utc::now(),
        })
    }

    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| *value)
    }

    /// Render a complete KML 2.2 document holding this placemark.
    pub fn to_kml(&self) -> String {
        let name = escape(self.name.as_str());

        let mut data_xml = String::new();
        let _ = writeln!(
            data_xml,
            "        <Data name=\"id\"><value>{}</value></Data>",
            self.feature_id
        );
        for (key, value) in &self.attributes {
            let _ = writeln!(
                data_xml,
                "        <Data name=\"{}\"><value>{}</value></Data>",
                escape(key.as_str()),
                value
            );
        }

        let coordinates = self
            .boundary
            .iter()
            .map(|p| format!("{:.8},{:.8},{:.3}", p.lon, p.lat, p.alt))
            .collect::<Vec<_>>()
            .join(" ");

        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<kml xmlns="http://www.opengis.net/kml/2.2">
  <Document>
    <name>{name}</name>
    <Style id="surface">
      <LineStyle>
        <color>{line_color}</color>
        <width>{line_width}</width>
      </LineStyle>
      <PolyStyle>
        <color>{fill_color}</color>
      </PolyStyle>
    </Style>
    <Placemark>
      <name>{name}</name>
      <TimeStamp><when>{when}</when></TimeStamp>
      <styleUrl>#surface</styleUrl>
      <ExtendedData>
{data_xml}      </ExtendedData>
      <Polygon>
        <altitudeMode>absolute</altitudeMode>
        <outerBoundaryIs>
          <LinearRing>
            <coordinates>{coordinates}</coordinates>
          </LinearRing>
        </outerBoundaryIs>
      </Polygon>
    </Placemark>
  </Document>
</kml>
"#,
            line_color = kml_color(self.style.outline_rgba),
            line_width = self.style.outline_width,
            fill_color = kml_color(self.style.fill_rgba),
            when = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
    }
}
