// Application state shared by the command handlers
use crate::application::chart_service::ChartService;
use crate::application::input_collector::InputCollector;
use crate::infrastructure::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub collector: InputCollector,
    pub chart_service: ChartService,
}
