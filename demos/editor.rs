//! Polyspline editor walkthrough — a scripted editing session on an
//! interactive spline.
//!
//! Usage:
//! ```text
//! cargo run --example editor                      # Catmull-Rom (default)
//! cargo run --example editor -- bspline           # any family: bezier, catmull-rom, bspline, hermite
//! RUST_LOG=polyspline=debug cargo run --example editor
//! ```

use polyspline::geometry::Piecewise;
use polyspline::math::Vector2;
use polyspline::operations::creation::{CurveFamily, InteractiveSpline, SplineBuilder};
use polyspline::operations::query::AccuracyParams;
use polyspline::tessellation::Polyline;

fn parse_family(name: &str) -> Option<CurveFamily> {
    match name {
        "bezier" => Some(CurveFamily::Bezier),
        "catmull-rom" => Some(CurveFamily::CatmullRom),
        "bspline" => Some(CurveFamily::BSpline),
        "hermite" => Some(CurveFamily::Hermite),
        _ => None,
    }
}

fn main() -> polyspline::Result<()> {
    // Default: WARN for everything, INFO for polyspline.
    // Override with RUST_LOG env var (e.g. RUST_LOG=polyspline=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("editor=info".parse().unwrap_or_default())
        .add_directive("polyspline=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let family = std::env::args()
        .nth(1)
        .and_then(|name| parse_family(&name))
        .unwrap_or_default();

    let mut builder: SplineBuilder<Vector2, InteractiveSpline<Vector2>> =
        SplineBuilder::with_params(family, AccuracyParams::new(1e-3, 1e-3)?)?;

    builder.set_controls([
        Vector2::new(0.0, 0.0),
        Vector2::new(2.0, 3.0),
        Vector2::new(5.0, 3.5),
        Vector2::new(7.0, 1.0),
        Vector2::new(10.0, 0.0),
        Vector2::new(12.0, 2.0),
        Vector2::new(13.0, 5.0),
    ])?;
    report("initial", &builder)?;

    // Drag a point, insert one, then delete it again.
    builder.change(3, Vector2::new(7.0, -1.0))?;
    report("after change", &builder)?;
    builder.insert(1, Vector2::new(1.0, 2.0))?;
    report("after insert", &builder)?;
    builder.remove(1)?;
    report("after remove", &builder)?;

    let spline = builder.spline();

    // Pick: which part of the curve is under the cursor?
    let cursor = Vector2::new(6.0, 3.0);
    let hit = spline.closest_point(&cursor)?;
    tracing::info!(
        t = hit.parameter,
        distance = hit.distance,
        x = hit.point.x,
        y = hit.point.y,
        "closest point to cursor"
    );

    // Evenly spaced markers along the curve.
    let length = spline.length()?;
    for i in 0..=4 {
        let s = length * f64::from(i) / 4.0;
        let t = spline.s2t(s)?;
        let p = spline.evaluate(t)?;
        tracing::info!(s, t, x = p.x, y = p.y, "marker");
    }

    let polyline: Polyline<Vector2> = spline.approximate(1e-2).collect();
    tracing::info!(
        vertices = polyline.len(),
        polyline_length = polyline.length(),
        arc_length = length,
        "flattened"
    );
    Ok(())
}

fn report(
    step: &str,
    builder: &SplineBuilder<Vector2, InteractiveSpline<Vector2>>,
) -> polyspline::Result<()> {
    let spline = builder.spline();
    tracing::info!(
        step,
        family = ?builder.family(),
        controls = builder.control_points().len(),
        segments = spline.segment_count(),
        length = spline.length()?,
        "spline updated"
    );
    Ok(())
}
