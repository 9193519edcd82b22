use dihedral_plot::render::config::{FigureConfig, ShortTwistLayout};

/// Base layer every file or command-line value is merged onto.
#[derive(Debug, Clone, Default)]
pub struct DefaultsConfig {
    pub figure: FigureConfig,
    pub short_twist: ShortTwistLayout,
}
