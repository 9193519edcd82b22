use dihedral_plot::render::config::RenderConfig;
use dihedral_plot::workflows::plot::PlotRequest;

pub struct AppConfig {
    pub request: PlotRequest,
    pub render: RenderConfig,
}
