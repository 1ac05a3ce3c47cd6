//! EXIF extraction
//!
//! Every field is optional. Unreadable or missing metadata yields `None`
//! rather than an error so uploads never fail on EXIF.

use std::io::Cursor;

use chrono::{DateTime, NaiveDateTime, Utc};
use exif::{Exif, In, Reader, Tag, Value};
use gallery_core::value_objects::ExifData;
use tracing::debug;

/// Pull camera metadata out of raw image bytes
pub fn extract_exif(bytes: &[u8]) -> Option<ExifData> {
    let mut data = ExifData::default();

    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => fill_from_exif(&mut data, &exif),
        Err(e) => debug!(error = %e, "No EXIF block"),
    }

    // Fall back to the decoded header for dimensions
    if data.width.is_none() || data.height.is_none() {
        if let Some((width, height)) = image_dimensions(bytes) {
            if data.width.is_none() {
                data.width = Some(width);
            }
            if data.height.is_none() {
                data.height = Some(height);
            }
        }
    }

    (!data.is_empty()).then_some(data)
}

/// Parse `YYYY:MM:DD HH:MM:SS` (also accepts dashes in the date part)
///
/// EXIF carries no zone, so the value is taken as UTC.
pub fn parse_exif_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim().trim_matches('"');
    NaiveDateTime::parse_from_str(value, "%Y:%m:%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S"))
        .ok()
        .map(|naive| naive.and_utc())
}

fn fill_from_exif(data: &mut ExifData, exif: &Exif) {
    data.date_taken = text(exif, Tag::DateTimeOriginal)
        .or_else(|| text(exif, Tag::DateTime))
        .and_then(|v| parse_exif_date(&v));

    let camera = [text(exif, Tag::Make), text(exif, Tag::Model)]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" ");
    data.camera = (!camera.is_empty()).then_some(camera);

    data.lens = text(exif, Tag::LensModel);
    data.focal_length = rational(exif, Tag::FocalLength).map(|v| format!("{} mm", format_decimal(v)));
    data.aperture = rational(exif, Tag::FNumber).map(|v| format!("f/{}", format_decimal(v)));
    data.iso = uint(exif, Tag::PhotographicSensitivity);
    data.exposure_time = exif
        .get_field(Tag::ExposureTime, In::PRIMARY)
        .map(|field| field.display_value().to_string());
    data.width = uint(exif, Tag::PixelXDimension);
    data.height = uint(exif, Tag::PixelYDimension);
}

fn text(exif: &Exif, tag: Tag) -> Option<String> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    let value = match &field.value {
        Value::Ascii(parts) => parts
            .first()
            .map(|raw| String::from_utf8_lossy(raw).trim_end_matches('\0').trim().to_string())?,
        _ => field.display_value().to_string().trim_matches('"').trim().to_string(),
    };
    (!value.is_empty()).then_some(value)
}

fn rational(exif: &Exif, tag: Tag) -> Option<f64> {
    let field = exif.get_field(tag, In::PRIMARY)?;
    match &field.value {
        Value::Rational(values) => values
            .first()
            .filter(|r| r.denom != 0)
            .map(|r| f64::from(r.num) / f64::from(r.denom)),
        _ => None,
    }
}

fn uint(exif: &Exif, tag: Tag) -> Option<u32> {
    exif.get_field(tag, In::PRIMARY)?.value.get_uint(0)
}

fn image_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?
        .into_dimensions()
        .ok()
}

/// One decimal place, dropping a trailing `.0`
fn format_decimal(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        format!("{rounded:.1}")
    }
}
