#![allow(clippy::unwrap_used)]

use approx::assert_abs_diff_eq;
use polyspline::geometry::{Curve, Piecewise, Segment, Spline};
use polyspline::math::Vector2;
use polyspline::operations::creation::{
    bezier_n_segments, bezier_segments, CurveFamily, InteractiveSpline, SplineBuilder,
};
use polyspline::operations::query::{AccuracyParams, ArcLength, Localization};

const FAMILIES: [CurveFamily; 4] = [
    CurveFamily::Bezier,
    CurveFamily::CatmullRom,
    CurveFamily::BSpline,
    CurveFamily::Hermite,
];

fn wave() -> Vec<Vector2> {
    (0..10)
        .map(|i| {
            let x = f64::from(i);
            Vector2::new(x, (x * 0.7).sin() * 2.0)
        })
        .collect()
}

// The editor demo's control polygon, scaled up to long curved segments.
fn wide_polygon() -> Vec<Vector2> {
    [
        (0.0, 0.0),
        (2.0, 3.0),
        (5.0, 3.5),
        (7.0, 1.0),
        (10.0, 0.0),
        (12.0, 2.0),
        (13.0, 5.0),
    ]
    .into_iter()
    .map(|(x, y)| Vector2::new(x, y) * 40.0)
    .collect()
}

type Editor = SplineBuilder<Vector2, InteractiveSpline<Vector2>>;

fn interactive_with(points: Vec<Vector2>, family: CurveFamily, accuracy: f64) -> Editor {
    let params = AccuracyParams::new(accuracy, accuracy).unwrap();
    let mut builder = Editor::with_params(family, params).unwrap();
    builder.set_controls(points).unwrap();
    builder
}

fn interactive(family: CurveFamily, accuracy: f64) -> Editor {
    interactive_with(wave(), family, accuracy)
}

#[test]
fn builders_produce_connected_segments() {
    for family in FAMILIES {
        let builder = interactive(family, 0.01);
        let segments = builder.spline().segments();
        assert!(!segments.is_empty(), "{family:?}");
        for pair in segments.windows(2) {
            assert_abs_diff_eq!(pair[0].evaluate(1.0), pair[1].evaluate(0.0), epsilon = 1e-9);
        }
    }
}

#[test]
fn arc_length_round_trip() {
    for family in FAMILIES {
        for (name, points) in [("wave", wave()), ("wide", wide_polygon())] {
            let builder = interactive_with(points, family, 1e-6);
            let spline = builder.spline();
            let t_max = spline.domain().t_max;
            for i in 0..=36 {
                let t = t_max * f64::from(i) / 36.0;
                let s = spline.t2s(t).unwrap();
                let back = spline.s2t(s).unwrap();
                assert!((back - t).abs() < 1e-4, "{family:?} {name}: t={t} back={back}");
            }
        }
    }
}

#[test]
fn arc_length_round_trip_at_joints() {
    for family in FAMILIES {
        for (name, points) in [("wave", wave()), ("wide", wide_polygon())] {
            let builder = interactive_with(points, family, 1e-6);
            let spline = builder.spline();
            for k in 0..=spline.segment_count() {
                let t = f64::from(u32::try_from(k).unwrap());
                let s = spline.t2s(t).unwrap();
                let back = spline
                    .s2t(s)
                    .unwrap_or_else(|e| panic!("{family:?} {name}: joint {k}: {e}"));
                assert!((back - t).abs() < 1e-9, "{family:?} {name}: joint {k} back={back}");
            }
        }
    }
}

#[test]
fn arc_length_is_monotone() {
    let builder = interactive(CurveFamily::CatmullRom, 1e-4);
    let spline = builder.spline();
    let t_max = spline.domain().t_max;
    let mut previous = 0.0;
    for i in 0..=200 {
        let s = spline.t2s(t_max * f64::from(i) / 200.0).unwrap();
        assert!(s >= previous - 1e-4, "s={s} previous={previous}");
        previous = s;
    }
    assert!((previous - spline.length().unwrap()).abs() < 1e-9);
}

#[test]
fn closest_point_is_no_farther_than_any_sample() {
    let builder = interactive(CurveFamily::CatmullRom, 1e-6);
    let spline = builder.spline();
    let t_max = spline.domain().t_max;
    let samples: Vec<Vector2> = (0..=45)
        .map(|i| spline.evaluate(t_max * f64::from(i) / 45.0).unwrap())
        .collect();

    for (i, query) in samples.iter().enumerate() {
        let (_, distance) = spline.distance(query).unwrap();
        for (j, other) in samples.iter().enumerate() {
            if i != j {
                assert!(distance <= (query - other).norm() + 1e-4);
            }
        }
        assert!(distance < 1e-4);
    }
}

#[test]
fn cubic_bezier_arch() {
    let segments = bezier_segments(&[
        Vector2::new(0.0, 0.0),
        Vector2::new(0.0, 1.0),
        Vector2::new(1.0, 1.0),
        Vector2::new(1.0, 0.0),
    ]);
    let spline = Spline::<_>::new(segments).unwrap();
    assert_abs_diff_eq!(spline.evaluate(0.0).unwrap(), Vector2::new(0.0, 0.0), epsilon = 1e-12);
    assert_abs_diff_eq!(spline.evaluate(1.0).unwrap(), Vector2::new(1.0, 0.0), epsilon = 1e-12);
    assert_abs_diff_eq!(spline.evaluate(0.5).unwrap(), Vector2::new(0.5, 0.75), epsilon = 1e-12);
}

#[test]
fn straight_line_length() {
    let points = [
        Vector2::new(0.0, 0.0),
        Vector2::new(10.0, 0.0),
        Vector2::new(20.0, 0.0),
        Vector2::new(30.0, 0.0),
    ];
    let accuracy = 0.01;

    // Three linear Bezier pieces.
    let linear = Spline::<_>::new(bezier_n_segments::<_, 2>(&points)).unwrap();
    assert_eq!(linear.segment_count(), 3);
    let linear = ArcLength::new(linear, accuracy).unwrap();
    assert!((linear.length().unwrap() - 30.0).abs() < accuracy);

    // One degenerate cubic.
    let cubic = Spline::<_>::new(bezier_segments(&points)).unwrap();
    let cubic = ArcLength::new(cubic, accuracy).unwrap();
    assert!((cubic.length().unwrap() - 30.0).abs() < accuracy);
}

#[test]
fn closest_point_on_line_segment() {
    let segment = Segment::new([
        Vector2::new(0.0, 0.0),
        Vector2::new(10.0, 0.0),
        Vector2::zeros(),
        Vector2::zeros(),
    ]);
    let accuracy = 0.01;
    let spline = Localization::new(Spline::<_>::new(vec![segment]).unwrap(), accuracy).unwrap();
    let (t, distance) = spline.distance(&Vector2::new(5.0, 5.0)).unwrap();
    assert!((t - 0.5).abs() < accuracy);
    assert!((distance - 5.0).abs() < accuracy);
}

#[test]
fn unchanged_point_rebuilds_identically() {
    for family in FAMILIES {
        let mut builder = interactive(family, 0.01);
        let before = builder.spline().segments().to_vec();
        for i in 0..builder.control_points().len() {
            let position = builder.control_points()[i].position;
            builder.change(i, position).unwrap();
            assert_eq!(builder.spline().segments(), before.as_slice(), "{family:?} at {i}");
        }
    }
}

#[test]
fn flattening_follows_the_curve() {
    let builder = interactive(CurveFamily::BSpline, 1e-3);
    let spline = builder.spline();
    let points: Vec<Vector2> = spline.approximate(1e-3).collect();
    assert_abs_diff_eq!(points[0], spline.evaluate(0.0).unwrap(), epsilon = 1e-12);
    assert_abs_diff_eq!(
        *points.last().unwrap(),
        spline.evaluate(spline.domain().t_max).unwrap(),
        epsilon = 1e-12
    );
    let polyline_length: f64 = points.windows(2).map(|w| (w[1] - w[0]).norm()).sum();
    let arc_length = spline.length().unwrap();
    assert!(polyline_length <= arc_length + 1e-3);
    assert!(polyline_length > arc_length * 0.99);
}
