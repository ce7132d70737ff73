use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use figchart::chart::{ChartConfig, DescriptionArea, DonutChart, DonutConfig};
use figchart::core::{Figure, FigureCollection, FigureRef};
use figchart::render::{CanvasCommand, ClipOp, Color, PathCommand, RecordingCanvas};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn colored_figures(values: &[f64]) -> (Rc<dyn FigureCollection>, Vec<Color>) {
    let colors: Vec<Color> = (0..values.len())
        .map(|i| Color::rgb(0.1 + 0.2 * i as f64, 0.3, 0.5))
        .collect();
    let figures: Vec<FigureRef> = values
        .iter()
        .zip(&colors)
        .map(|(value, color)| Rc::new(Figure::new(*value).with_color(*color)) as FigureRef)
        .collect();
    (Rc::new(figures), colors)
}

fn opened_donut(values: &[f64]) -> (DonutChart, Vec<Color>) {
    let (figures, colors) = colored_figures(values);
    let mut chart = DonutChart::new(ChartConfig::default(), DonutConfig::default());
    chart.set_figures(Some(figures));
    chart.advance(ms(2000));
    (chart, colors)
}

/// Start/end boundary points of a recorded pie wedge.
fn wedge_endpoints(path: &figchart::render::Path) -> ((f64, f64), (f64, f64)) {
    let mut line_to = None;
    let mut arc_to = None;
    for command in path.commands() {
        match *command {
            PathCommand::LineTo { x, y } => line_to = Some((x, y)),
            PathCommand::ArcTo { x, y, .. } => arc_to = Some((x, y)),
            _ => {}
        }
    }
    (line_to.expect("wedge start"), arc_to.expect("wedge end"))
}

fn polar(radius: f64, angle: f64) -> (f64, f64) {
    let angle = angle - FRAC_PI_2;
    (radius * angle.cos(), radius * angle.sin())
}

#[test]
fn wedges_cover_the_circle_in_value_proportions() {
    // Sum 57; expected cumulative boundaries 0, 20/57, 25/57, 37/57, 1.
    let (chart, colors) = opened_donut(&[20.0, 5.0, 12.0, 20.0]);

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    let filled = canvas.filled_paths();
    assert_eq!(filled.len(), 4);

    // Default config, no legend: radius = 240/2 - padding 20.
    let radius = 100.0;
    let boundaries = [0.0, 20.0 / 57.0, 25.0 / 57.0, 37.0 / 57.0, 1.0];

    for (index, (path, color)) in filled.iter().enumerate() {
        assert_eq!(*color, colors[index]);

        let ((start_x, start_y), (end_x, end_y)) = wedge_endpoints(path);
        let (expected_start_x, expected_start_y) = polar(radius, boundaries[index] * TAU);
        let (expected_end_x, expected_end_y) = polar(radius, boundaries[index + 1] * TAU);

        assert_relative_eq!(start_x, expected_start_x, epsilon = 1e-6);
        assert_relative_eq!(start_y, expected_start_y, epsilon = 1e-6);
        assert_relative_eq!(end_x, expected_end_x, epsilon = 1e-6);
        assert_relative_eq!(end_y, expected_end_y, epsilon = 1e-6);
    }
}

#[test]
fn donut_clips_to_the_annulus_before_filling() {
    let (chart, _) = opened_donut(&[1.0, 2.0]);

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    let clips: Vec<(&figchart::render::Path, ClipOp)> = canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            CanvasCommand::ClipPath { path, op } => Some((path, *op)),
            _ => None,
        })
        .collect();
    assert_eq!(clips.len(), 2);

    // Inner hole removed first (0.45 of the 100 px radius), then the
    // outer circle bounds the fill.
    let circle_radius = |path: &figchart::render::Path| match path.commands() {
        [PathCommand::Circle { radius, .. }] => *radius,
        other => panic!("expected a single circle, got {other:?}"),
    };
    assert_eq!(clips[0].1, ClipOp::Difference);
    assert_relative_eq!(circle_radius(clips[0].0), 45.0, epsilon = 1e-9);
    assert_eq!(clips[1].1, ClipOp::Intersect);
    assert_relative_eq!(circle_radius(clips[1].0), 100.0, epsilon = 1e-9);
}

#[test]
fn polygon_mode_clips_with_polygon_shapes() {
    let (figures, _) = colored_figures(&[1.0]);
    let config = DonutConfig {
        polygon: true,
        outer_corners: 7,
        inner_corners: 5,
        ..DonutConfig::default()
    };
    let mut chart = DonutChart::new(ChartConfig::default(), config);
    chart.set_figures(Some(figures));
    chart.advance(ms(2000));

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    let vertex_counts: Vec<usize> = canvas
        .commands()
        .iter()
        .filter_map(|command| match command {
            CanvasCommand::ClipPath { path, .. } => Some(
                path.commands()
                    .iter()
                    .filter(|c| {
                        matches!(
                            c,
                            PathCommand::MoveTo { .. } | PathCommand::LineTo { .. }
                        )
                    })
                    .count(),
            ),
            _ => None,
        })
        .collect();
    assert_eq!(vertex_counts, vec![5, 7]);
}

#[test]
fn empty_chart_fills_the_placeholder_wedge() {
    let mut chart = DonutChart::new(ChartConfig::default(), DonutConfig::default());
    chart.set_figures(Some(Rc::new(Vec::<FigureRef>::new())));
    chart.advance(ms(2000));

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    let filled = canvas.filled_paths();
    assert_eq!(filled.len(), 1);
    assert_eq!(filled[0].1, Color::GRAY);
    // Fully opened at full angle: the placeholder is the whole circle.
    assert_eq!(
        filled[0].0.commands(),
        &[PathCommand::Circle {
            cx: 0.0,
            cy: 0.0,
            radius: 100.0
        }]
    );
}

#[test]
fn all_zero_values_fall_back_to_a_unit_sum() {
    let (chart, _) = opened_donut(&[0.0, 0.0, 0.0]);

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    // Three degenerate wedges, no division-by-zero panic.
    assert_eq!(canvas.filled_paths().len(), 3);
}

#[test]
fn half_angle_donut_spans_half_a_turn() {
    let (figures, _) = colored_figures(&[1.0]);
    let config = DonutConfig {
        full_angle_degrees: 180.0,
        ..DonutConfig::default()
    };
    let mut chart = DonutChart::new(ChartConfig::default(), config);
    chart.set_figures(Some(figures));
    chart.advance(ms(2000));

    assert_relative_eq!(chart.current_angle(), TAU / 2.0, epsilon = 1e-12);

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 240.0, 240.0).expect("draw");

    let filled = canvas.filled_paths();
    assert_eq!(filled.len(), 1);
    let ((start_x, start_y), (end_x, end_y)) = wedge_endpoints(filled[0].0);
    assert_relative_eq!(start_x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(start_y, -100.0, epsilon = 1e-6);
    assert_relative_eq!(end_x, 0.0, epsilon = 1e-6);
    assert_relative_eq!(end_y, 100.0, epsilon = 1e-6);
}

#[test]
fn single_sided_legend_shifts_the_center() {
    let (figures, _) = colored_figures(&[1.0]);
    let chart_config = ChartConfig::default().with_description_position(DescriptionArea::Right);
    let mut chart = DonutChart::new(chart_config, DonutConfig::default());
    chart.set_figures(Some(figures));
    chart.advance(ms(2000));

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 600.0, 300.0).expect("draw");

    let translate = canvas
        .commands()
        .iter()
        .find_map(|command| match *command {
            CanvasCommand::Translate { dx, dy } => Some((dx, dy)),
            _ => None,
        })
        .expect("center translate");
    // Center moves half the description space (175) to the left.
    assert_relative_eq!(translate.0, 300.0 - 87.5, epsilon = 1e-9);
    assert_relative_eq!(translate.1, 150.0, epsilon = 1e-9);
}

#[test]
fn inner_circle_changes_animate_when_configured() {
    let config = DonutConfig {
        inner_circle_animation_ms: 400,
        ..DonutConfig::default()
    };
    let mut chart = DonutChart::new(ChartConfig::default(), config);
    chart.advance(ms(2000));
    assert_relative_eq!(chart.inner_circle_proportion_animated(), 0.45, epsilon = 1e-12);

    chart.set_inner_circle_proportion(0.8);
    assert_relative_eq!(chart.inner_circle_proportion_animated(), 0.45, epsilon = 1e-12);

    chart.advance(ms(200));
    let midway = chart.inner_circle_proportion_animated();
    assert!(midway > 0.45 && midway < 0.8);

    chart.advance(ms(200));
    assert_relative_eq!(chart.inner_circle_proportion_animated(), 0.8, epsilon = 1e-12);
}

#[test]
fn inner_circle_changes_apply_instantly_without_a_duration() {
    let mut chart = DonutChart::new(ChartConfig::default(), DonutConfig::default());
    chart.set_inner_circle_proportion(1.4);
    // Clamped and applied directly.
    assert_relative_eq!(chart.inner_circle_proportion_animated(), 1.0, epsilon = 1e-12);
}
