use std::rc::Rc;
use std::time::Duration;

use figchart::chart::{ChartConfig, ChartCore};
use figchart::core::{Figure, FigureCollection, FigureList, FigureRef};
use proptest::prelude::*;

fn opened_core(values: &[f64]) -> ChartCore {
    let figures: Vec<FigureRef> = values
        .iter()
        .map(|value| Rc::new(Figure::new(*value)) as FigureRef)
        .collect();
    let mut core = ChartCore::new(ChartConfig::default());
    core.set_figures(Some(Rc::new(figures) as Rc<dyn FigureCollection>));
    core.advance(Duration::from_millis(2000));
    core
}

proptest! {
    #[test]
    fn wedge_shares_sum_to_one_whenever_the_sum_is_positive(
        values in proptest::collection::vec(0.0f64..1_000.0, 1..12)
    ) {
        let core = opened_core(&values);

        let sum: f64 = core
            .figure_accesses()
            .iter()
            .map(|access| access.animated_value())
            .sum();
        prop_assume!(sum > 0.0);

        let shares: f64 = core
            .figure_accesses()
            .iter()
            .map(|access| access.animated_value() / sum)
            .sum();
        prop_assert!((shares - 1.0).abs() <= 1e-9);
    }

    #[test]
    fn entrance_stays_in_unit_range_through_arbitrary_ticks(
        ticks in proptest::collection::vec(0u64..400, 1..20)
    ) {
        let list = Rc::new(FigureList::new());
        let mut core = ChartCore::new(ChartConfig::default());
        core.set_figures(Some(Rc::clone(&list) as Rc<dyn FigureCollection>));

        let figure: FigureRef = Rc::new(Figure::new(5.0));
        list.push(Rc::clone(&figure));

        for tick in ticks {
            core.advance(Duration::from_millis(tick));
            for access in core.figure_accesses().iter() {
                prop_assert!((0.0..=1.0).contains(&access.entrance()));
                prop_assert!((0.0..=1.0).contains(&core.opened_proportion()));
            }
        }
    }

    #[test]
    fn value_updates_never_produce_a_non_finite_proportion(
        first in -1_000.0f64..1_000.0,
        second in -1_000.0f64..1_000.0
    ) {
        let list = Rc::new(FigureList::new());
        let figure = Rc::new(Figure::new(first));
        list.push(Rc::clone(&figure) as FigureRef);

        let mut core = ChartCore::new(ChartConfig::default());
        core.set_figures(Some(Rc::clone(&list) as Rc<dyn FigureCollection>));
        core.advance(Duration::from_millis(2000));

        figure.set_value(second);
        core.advance(Duration::ZERO);
        figure.set_value(0.0);
        core.advance(Duration::ZERO);

        let source = Rc::clone(&figure) as FigureRef;
        let access = core.figure_accesses().get_by_source(&source).unwrap();
        prop_assert!(access.value_delta_proportion().is_finite());
        prop_assert!(access.animated_value().is_finite());
    }
}
