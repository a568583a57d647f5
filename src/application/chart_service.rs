// Chart service - Use case for collecting, validating and plotting a series
use crate::application::input_collector::{parse_values, InputCollector, LineSource};
use crate::application::series_validator::SeriesValidator;
use crate::domain::chart::ChartPlan;
use crate::domain::error::ChartError;
use crate::domain::series::{Calendar, Monthly, Series, Weekly};
use std::path::PathBuf;
use std::sync::Arc;

/// Draws a chart plan somewhere the user can look at it.
pub trait ChartRenderer: Send + Sync {
    /// Returns where the chart ended up.
    fn render(&self, plan: &ChartPlan, name: &str) -> anyhow::Result<PathBuf>;
}

/// A calendar unit the service knows how to chart.
pub trait Chartable: Calendar + Sized {
    const CHART_NAME: &'static str;

    fn plan(series: &Series<Self>, smooth_points: usize) -> Result<ChartPlan, ChartError>;
}

impl Chartable for Monthly {
    const CHART_NAME: &'static str = "books-per-month";

    fn plan(series: &Series<Self>, smooth_points: usize) -> Result<ChartPlan, ChartError> {
        ChartPlan::monthly(series, smooth_points)
    }
}

impl Chartable for Weekly {
    const CHART_NAME: &'static str = "hours-per-day";

    fn plan(series: &Series<Self>, _smooth_points: usize) -> Result<ChartPlan, ChartError> {
        Ok(ChartPlan::weekly(series))
    }
}

#[derive(Clone)]
pub struct ChartService {
    renderer: Arc<dyn ChartRenderer>,
    validator: SeriesValidator,
    collector: InputCollector,
    smooth_points: usize,
}

impl ChartService {
    pub fn new(
        renderer: Arc<dyn ChartRenderer>,
        validator: SeriesValidator,
        collector: InputCollector,
        smooth_points: usize,
    ) -> Self {
        Self {
            renderer,
            validator,
            collector,
            smooth_points,
        }
    }

    /// Parses and validates one line without reprompting.
    pub fn series_from_line<C: Chartable>(&self, line: &str) -> Result<Series<C>, ChartError> {
        let values = parse_values(line)?;
        self.validator.validate_series::<C>(values)
    }

    /// Prompts until a valid series is entered or attempts run out.
    pub fn collect<C: Chartable>(&self, source: &mut dyn LineSource) -> anyhow::Result<Series<C>> {
        self.collector
            .prompt_until(source, C::KIND.prompt(), |line| self.series_from_line::<C>(line))
    }

    pub fn plot<C: Chartable>(&self, series: &Series<C>) -> anyhow::Result<PathBuf> {
        let plan = C::plan(series, self.smooth_points)?;
        tracing::debug!(
            "Rendering {} with tick interval {} and y upper bound {}",
            C::CHART_NAME,
            plan.tick_interval,
            plan.y_upper
        );
        let path = self.renderer.render(&plan, C::CHART_NAME)?;
        tracing::debug!("Chart written to {}", path.display());
        Ok(path)
    }

    pub fn run<C: Chartable>(&self, source: &mut dyn LineSource) -> anyhow::Result<PathBuf> {
        let series = self.collect::<C>(source)?;
        self.plot(&series)
    }

    /// Non-interactive variant for values given on the command line.
    pub fn run_line<C: Chartable>(&self, line: &str) -> anyhow::Result<PathBuf> {
        let series = self.series_from_line::<C>(line)?;
        self.plot(&series)
    }
}
