//! Subcommand implementations

use crate::config::Settings;
use crate::{Axis, Route};
use anyhow::{Context, Result};
use geoclass_geo::{barycenter as mean_position, format_dms, negative_hemispheres, parse_dms, GeoPoint};
use geoclass_sources::{setup_source, Backend, OptionsOverrides, SourceKind};
use geoclass_telemetry::Timer;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

impl Route {
    fn points(&self) -> Result<(GeoPoint, GeoPoint)> {
        let from = GeoPoint::parse(&self.from_name, self.from_latitude.as_str(), self.from_longitude.as_str(), true)
            .with_context(|| format!("Invalid coordinates for {}", self.from_name))?;
        let to = GeoPoint::parse(&self.to_name, self.to_latitude.as_str(), self.to_longitude.as_str(), true)
            .with_context(|| format!("Invalid coordinates for {}", self.to_name))?;
        Ok((from, to))
    }
}

pub fn distance(route: &Route, settings: Settings, json: bool) -> Result<()> {
    let (from, to) = route.points()?;
    let unit = settings.unit;
    let bearing = from.bearing_to(&to, settings.form, settings.language);

    if json {
        let report = json!({
            "from": from,
            "to": to,
            "unit": unit.label(),
            "distance": from.distance_to(&to, unit),
            "north_south": from.north_south_distance(&to, unit),
            "west_east": from.west_east_distance(&to, unit),
            "bearing": bearing,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{} {} {}", from.info().bold(), "->".dimmed(), to.info().bold());
    println!("  Distance:     {}", from.distance_string(&to, unit));
    println!(
        "  North-south:  {:.2} {}",
        from.north_south_distance(&to, unit),
        unit.label()
    );
    println!(
        "  West-east:    {:.2} {}",
        from.west_east_distance(&to, unit),
        unit.label()
    );
    println!("  Bearing:      {bearing}");
    Ok(())
}

pub fn bearing(route: &Route, settings: Settings, json: bool) -> Result<()> {
    let (from, to) = route.points()?;
    let bearing = from.bearing_to(&to, settings.form, settings.language);

    if json {
        let report = json!({
            "from": from.name(),
            "to": to.name(),
            "bearing": bearing,
            "language": settings.language,
            "form": settings.form,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{bearing}");
    }
    Ok(())
}

pub fn to_degrees(dms: &str, settings: Settings, json: bool) -> Result<()> {
    let degrees = parse_dms(dms, settings.language)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({"input": dms, "degrees": degrees}))?);
    } else {
        println!("{:.*}", settings.decimal_places as usize, degrees);
    }
    Ok(())
}

pub fn to_dms(degrees: f64, axis: Option<Axis>, places: Option<u32>, settings: Settings, json: bool) -> Result<()> {
    let places = places.unwrap_or(settings.decimal_places);
    let body = format_dms(degrees, places);

    let text = match axis {
        Some(axis) => {
            let [south, west] = negative_hemispheres(settings.language);
            let letter = match axis {
                Axis::Lat if degrees > 0.0 => "N",
                Axis::Lat => south,
                Axis::Lon if degrees > 0.0 => "E",
                Axis::Lon => west,
            };
            format!("{letter} {body}")
        }
        None if degrees < 0.0 => format!("-{body}"),
        None => body,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&json!({"degrees": degrees, "dms": text}))?);
    } else {
        println!("{text}");
    }
    Ok(())
}

pub fn barycenter(file: &Path, name: &str, settings: Settings, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;
    let points: Vec<GeoPoint> =
        serde_json::from_str(&content).with_context(|| format!("Failed to parse points in {}", file.display()))?;
    tracing::debug!(points = points.len(), "Computing barycenter");

    let center = mean_position(&points, name)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&center)?);
    } else {
        println!("{}", center.info().bold());
        println!("  {}", center.latitude_dms());
        println!("  {}", center.longitude_dms());
        println!(
            "  {:.*} / {:.*}",
            settings.decimal_places as usize,
            center.latitude(),
            settings.decimal_places as usize,
            center.longitude()
        );
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
pub fn near(
    file: &Path,
    name: &str,
    latitude: &str,
    longitude: &str,
    radius: f64,
    hits: usize,
    settings: Settings,
    json: bool,
) -> Result<()> {
    let origin = GeoPoint::parse(name, latitude, longitude, true).context("Invalid origin coordinates")?;
    let document = std::fs::read_to_string(file).with_context(|| format!("Failed to read {}", file.display()))?;

    let overrides = OptionsOverrides {
        unit: Some(settings.unit),
        language: Some(settings.language),
        ..Default::default()
    };
    let source = setup_source(SourceKind::Rdf, Backend::Document(document), overrides)?;

    let timer = Timer::start("near_search");
    let found = source.find_near(&origin, radius, hits)?;
    timer.stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        println!("No points within {radius} {} of {}", settings.unit.label(), origin.info());
        return Ok(());
    }

    println!("{}", format!("Within {radius} {} of {}:", settings.unit.label(), origin.info()).bold());
    for point in &found {
        let distance = point.distance_attribute().unwrap_or_default();
        println!(
            "  {:<30} {:>10.2} {:<5} {}",
            point.name(),
            distance,
            settings.unit.label(),
            origin.bearing_to(point, settings.form, settings.language)
        );
    }
    Ok(())
}
