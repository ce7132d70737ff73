use std::rc::Rc;
use std::time::Duration;

use approx::assert_relative_eq;
use figchart::chart::{BarChart, BarConfig, BarOrientation, ChartConfig};
use figchart::core::{Figure, FigureCollection, FigureRef};
use figchart::render::{Color, RecordingCanvas};

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn figures(values: &[f64]) -> Rc<dyn FigureCollection> {
    let figures: Vec<FigureRef> = values
        .iter()
        .map(|value| Rc::new(Figure::new(*value).with_color(Color::rgb(0.2, 0.2, 0.8))) as FigureRef)
        .collect();
    Rc::new(figures)
}

fn opened_bar_chart(values: &[f64], config: BarConfig) -> BarChart {
    let mut chart = BarChart::new(ChartConfig::default(), config);
    chart.set_figures(Some(figures(values)));
    chart.advance(ms(2000));
    chart
}

#[test]
fn upward_bars_grow_from_the_bottom_in_value_proportion() {
    // Max 20: relative heights 0.5, 1.0, 0.25 of the vertical extent.
    let chart = opened_bar_chart(&[10.0, 20.0, 5.0], BarConfig::default());

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    let rects = canvas.filled_rects();
    assert_eq!(rects.len(), 3);

    // No legend: span 400 - 2*20 = 360, three bars of 120; vertical
    // extent 300 - 2*20 = 260.
    let extents = [0.5 * 260.0, 260.0, 0.25 * 260.0];
    for (index, (x, y, w, h)) in rects
        .iter()
        .map(|(x, y, w, h, _)| (*x, *y, *w, *h))
        .enumerate()
    {
        assert_relative_eq!(x, 20.0 + 120.0 * index as f64, epsilon = 1e-9);
        assert_relative_eq!(w, 120.0, epsilon = 1e-9);
        assert_relative_eq!(h, extents[index], epsilon = 1e-9);
        // Bars sit on the bottom padding edge.
        assert_relative_eq!(y, 300.0 - 20.0 - extents[index], epsilon = 1e-9);
    }
}

#[test]
fn downward_bars_hang_from_the_top_edge() {
    let chart = opened_bar_chart(
        &[10.0, 20.0],
        BarConfig {
            orientation: BarOrientation::Down,
            ..BarConfig::default()
        },
    );

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    for (_, y, _, _, _) in canvas.filled_rects() {
        assert_relative_eq!(y, 20.0, epsilon = 1e-9);
    }
}

#[test]
fn sideways_bars_lay_out_along_the_vertical_axis() {
    let chart = opened_bar_chart(
        &[10.0, 20.0],
        BarConfig {
            orientation: BarOrientation::Right,
            ..BarConfig::default()
        },
    );

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    let rects = canvas.filled_rects();
    assert_eq!(rects.len(), 2);

    // Two bars of (300 - 40) / 2 = 130 thickness, growing rightward from
    // the left padding edge; extents 180 and 360 of the 360 span.
    let (x0, y0, w0, h0, _) = rects[0];
    assert_relative_eq!(x0, 20.0, epsilon = 1e-9);
    assert_relative_eq!(y0, 20.0, epsilon = 1e-9);
    assert_relative_eq!(w0, 180.0, epsilon = 1e-9);
    assert_relative_eq!(h0, 130.0, epsilon = 1e-9);

    let (x1, y1, w1, _, _) = rects[1];
    assert_relative_eq!(x1, 20.0, epsilon = 1e-9);
    assert_relative_eq!(y1, 150.0, epsilon = 1e-9);
    assert_relative_eq!(w1, 360.0, epsilon = 1e-9);
}

#[test]
fn bar_padding_insets_each_bar() {
    let chart = opened_bar_chart(
        &[10.0, 20.0, 5.0],
        BarConfig {
            bar_padding: 10.0,
            ..BarConfig::default()
        },
    );

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    for (index, (x, _, w, _, _)) in canvas.filled_rects().iter().enumerate() {
        assert_relative_eq!(*x, 20.0 + 10.0 + 120.0 * index as f64, epsilon = 1e-9);
        assert_relative_eq!(*w, 100.0, epsilon = 1e-9);
    }
}

#[test]
fn all_zero_values_draw_zero_extent_bars() {
    let chart = opened_bar_chart(&[0.0, 0.0, 0.0], BarConfig::default());

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    let rects = canvas.filled_rects();
    assert_eq!(rects.len(), 3);
    for (_, _, _, h, _) in rects {
        assert_eq!(h, 0.0);
    }
}

#[test]
fn empty_chart_draws_no_bars() {
    let mut chart = BarChart::new(ChartConfig::default(), BarConfig::default());
    chart.set_figures(Some(Rc::new(Vec::<FigureRef>::new())));
    chart.advance(ms(2000));

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");
    assert!(canvas.filled_rects().is_empty());
}

#[test]
fn bars_track_the_opening_animation() {
    let mut chart = BarChart::new(ChartConfig::default(), BarConfig::default());
    chart.set_figures(Some(figures(&[10.0, 20.0])));
    chart.advance(ms(1000));

    let mut canvas = RecordingCanvas::new();
    chart.draw(&mut canvas, 400.0, 300.0).expect("draw");

    // Bar extents normalize by the max animated value, so mid-opening
    // the bars already show their full relative heights.
    let rects = canvas.filled_rects();
    assert_eq!(rects.len(), 2);
    assert_relative_eq!(rects[0].3, 130.0, epsilon = 1e-9);
    assert_relative_eq!(rects[1].3, 260.0, epsilon = 1e-9);
}
