use gtk4 as gtk;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use gtk::glib;
use gtk::prelude::{DrawingAreaExtManual, WidgetExt};

use crate::chart::{BarChart, ChartCore, DonutChart};
use crate::error::ChartResult;
use crate::render::{Canvas, CairoCanvas};

/// Chart shapes the GTK adapter can host.
pub trait EmbeddableChart: 'static {
    fn advance(&mut self, dt: Duration);
    fn draw(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()>;
    fn core_mut(&mut self) -> &mut ChartCore;
}

impl EmbeddableChart for DonutChart {
    fn advance(&mut self, dt: Duration) {
        Self::advance(self, dt);
    }

    fn draw(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        Self::draw(self, canvas, width, height)
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        Self::core_mut(self)
    }
}

impl EmbeddableChart for BarChart {
    fn advance(&mut self, dt: Duration) {
        Self::advance(self, dt);
    }

    fn draw(&self, canvas: &mut dyn Canvas, width: f64, height: f64) -> ChartResult<()> {
        Self::draw(self, canvas, width, height)
    }

    fn core_mut(&mut self) -> &mut ChartCore {
        Self::core_mut(self)
    }
}

/// Wires a chart into a GTK `DrawingArea`.
///
/// The widget's frame clock drives the chart's animations; honored redraw
/// requests queue a widget draw, and the draw func bridges to
/// [`CairoCanvas`].
pub fn attach_chart<C: EmbeddableChart>(area: &gtk::DrawingArea, chart: Rc<RefCell<C>>) {
    let draw_chart = Rc::clone(&chart);
    area.set_draw_func(move |_, context, width, height| {
        let mut canvas = CairoCanvas::from_context(context.clone());
        if let Err(err) =
            draw_chart
                .borrow()
                .draw(&mut canvas, f64::from(width), f64::from(height))
        {
            tracing::warn!(error = %err, "chart draw failed");
        }
    });

    let mut last_tick = Instant::now();
    area.add_tick_callback(move |area, _clock| {
        let now = Instant::now();
        let dt = now - last_tick;
        last_tick = now;

        let mut chart = chart.borrow_mut();
        chart.advance(dt);
        if chart.core_mut().take_pending_repaint() {
            area.queue_draw();
        }
        glib::ControlFlow::Continue
    });
}
