use super::config::FigureConfig;
use super::error::RenderError;
use super::figure::Figure;
use super::fonts::FontBook;
use super::progress::{Progress, ProgressReporter};
use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// Paths of the vector and raster files written for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFiles {
    pub pdf: PathBuf,
    pub png: PathBuf,
}

impl OutputFiles {
    /// `<base>.pdf` and `<base>.png`; dots already in `base` are kept.
    pub fn for_base(base: &Path) -> Self {
        Self {
            pdf: with_suffix(base, ".pdf"),
            png: with_suffix(base, ".png"),
        }
    }
}

fn with_suffix(base: &Path, suffix: &str) -> PathBuf {
    let mut name = base.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Encodes `figure` as PDF and PNG next to `base`, shaping its text with the
/// faces in `fonts`.
///
/// Both encodings are staged in temporary files inside the destination
/// directory and only renamed into place once both exist, so a failure
/// never leaves one format behind without the other.
pub fn export(
    figure: &Figure,
    base: &Path,
    config: &FigureConfig,
    fonts: &FontBook,
    reporter: &ProgressReporter,
) -> Result<OutputFiles, RenderError> {
    let outputs = OutputFiles::for_base(base);
    let dir = match base.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let tree = parse_svg(figure, fonts)?;

    reporter.report(Progress::TaskStart { total_steps: 2 });
    let pdf = encode_pdf(&tree)?;
    let staged_pdf = stage(&dir, &pdf)?;
    reporter.report(Progress::TaskIncrement);

    let png = encode_png(&tree, config)?;
    let staged_png = stage(&dir, &png)?;
    reporter.report(Progress::TaskIncrement);

    persist(staged_pdf, &outputs.pdf)?;
    if let Err(e) = persist(staged_png, &outputs.png) {
        if let Err(cleanup) = remove_if_exists(&outputs.pdf) {
            warn!("Could not remove {}: {}", outputs.pdf.display(), cleanup);
        }
        return Err(e);
    }
    reporter.report(Progress::TaskFinish);

    info!(
        "Wrote {} ({} bytes) and {} ({} bytes)",
        outputs.pdf.display(),
        pdf.len(),
        outputs.png.display(),
        png.len()
    );
    Ok(outputs)
}

fn parse_svg(figure: &Figure, fonts: &FontBook) -> Result<usvg::Tree, RenderError> {
    let options = usvg::Options {
        fontdb: fonts.database(),
        ..Default::default()
    };
    debug!(
        "Parsing {:?} figure with {} font face(s)",
        figure.size(),
        options.fontdb.len()
    );

    usvg::Tree::from_str(figure.svg(), &options).map_err(|e| RenderError::Export {
        format: "SVG",
        message: e.to_string(),
    })
}

fn encode_pdf(tree: &usvg::Tree) -> Result<Vec<u8>, RenderError> {
    svg2pdf::to_pdf(
        tree,
        svg2pdf::ConversionOptions::default(),
        svg2pdf::PageOptions::default(),
    )
    .map_err(|e| RenderError::Export {
        format: "PDF",
        message: format!("{e:?}"),
    })
}

fn encode_png(tree: &usvg::Tree, config: &FigureConfig) -> Result<Vec<u8>, RenderError> {
    let scale = config.raster_scale();
    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| RenderError::Export {
        format: "PNG",
        message: format!("cannot allocate a {width}x{height} raster"),
    })?;
    if !config.transparent {
        pixmap.fill(Color::WHITE);
    }
    resvg::render(tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| RenderError::Export {
        format: "PNG",
        message: e.to_string(),
    })
}

fn stage(dir: &Path, bytes: &[u8]) -> Result<NamedTempFile, RenderError> {
    let mut file = NamedTempFile::new_in(dir).map_err(|e| RenderError::io(dir, e))?;
    file.write_all(bytes)
        .and_then(|()| file.flush())
        .map_err(|e| RenderError::io(file.path(), e))?;
    Ok(file)
}

fn persist(staged: NamedTempFile, target: &Path) -> Result<(), RenderError> {
    staged
        .persist(target)
        .map(|_| ())
        .map_err(|e| RenderError::io(target, e.error))?;
    debug!("Persisted {}", target.display());
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), RenderError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(RenderError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::charts::test_support::series;
    use crate::render::config::{ChartVariant, RenderConfigBuilder};
    use crate::render::renderer::Renderer;
    use plotters::prelude::{BLUE, Rectangle};
    use plotters::style::Color as _;
    use resvg::usvg::fontdb::Database;
    use tempfile::tempdir;

    fn no_fonts() -> FontBook {
        FontBook::from_database(Database::new(), "serif")
    }

    fn text_nodes(group: &usvg::Group) -> usize {
        group
            .children()
            .iter()
            .map(|node| match node {
                usvg::Node::Group(g) => text_nodes(g),
                usvg::Node::Text(_) => 1,
                _ => 0,
            })
            .sum()
    }

    fn sample_figure(size: (u32, u32)) -> Figure {
        Figure::draw("test", size, |root| {
            root.draw(&Rectangle::new([(20, 20), (40, 40)], BLUE.filled()))
        })
        .unwrap()
    }

    #[test]
    fn writes_pdf_and_png_next_to_base() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("phi");
        let config = FigureConfig::default();

        let outputs = export(
            &sample_figure(config.canvas_size()),
            &base,
            &config,
            &no_fonts(),
            &ProgressReporter::new(),
        )
        .unwrap();

        assert_eq!(outputs.pdf, dir.path().join("phi.pdf"));
        assert_eq!(outputs.png, dir.path().join("phi.png"));
        let pdf = fs::read(&outputs.pdf).unwrap();
        assert!(pdf.starts_with(b"%PDF"));
        let png = fs::read(&outputs.png).unwrap();
        assert!(png.starts_with(b"\x89PNG"));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn png_is_scaled_to_dpi_and_transparent() {
        let dir = tempdir().unwrap();
        let config = FigureConfig {
            dpi: 144,
            ..Default::default()
        };
        let outputs = export(
            &sample_figure((100, 50)),
            &dir.path().join("scaled"),
            &config,
            &no_fonts(),
            &ProgressReporter::new(),
        )
        .unwrap();

        let pixmap = Pixmap::decode_png(&fs::read(&outputs.png).unwrap()).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (200, 100));
        assert_eq!(pixmap.pixel(0, 0).unwrap().alpha(), 0);
        assert_eq!(pixmap.pixel(60, 60).unwrap().alpha(), 255);
    }

    #[test]
    fn opaque_background_when_transparency_is_disabled() {
        let dir = tempdir().unwrap();
        let config = FigureConfig {
            dpi: 72,
            transparent: false,
            ..Default::default()
        };
        let outputs = export(
            &sample_figure((100, 50)),
            &dir.path().join("opaque"),
            &config,
            &no_fonts(),
            &ProgressReporter::new(),
        )
        .unwrap();

        let pixmap = Pixmap::decode_png(&fs::read(&outputs.png).unwrap()).unwrap();
        let corner = pixmap.pixel(0, 0).unwrap();
        assert_eq!(corner.alpha(), 255);
        assert_eq!(corner.red(), 255);
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("missing-subdir").join("phi");
        let config = FigureConfig::default();

        let err = export(
            &sample_figure(config.canvas_size()),
            &base,
            &config,
            &no_fonts(),
            &ProgressReporter::new(),
        )
        .unwrap_err();

        assert!(matches!(err, RenderError::Io { .. }));
        assert!(!base.with_extension("pdf").exists());
        assert!(!base.with_extension("png").exists());
    }

    #[test]
    fn chart_labels_survive_svg_parsing() {
        let config = FigureConfig::default();
        let fonts = FontBook::load(&config.font_family);
        if fonts.is_empty() {
            return;
        }
        let renderer = Renderer::new(
            RenderConfigBuilder::new()
                .figure(FigureConfig {
                    font_family: fonts.family().to_string(),
                    ..config
                })
                .variant(ChartVariant::Full)
                .build()
                .unwrap(),
        );
        let figure = renderer.draw(&series(vec![0.0, 90.0, -90.0], 2)).unwrap();

        let tree = parse_svg(&figure, &fonts).unwrap();

        assert!(figure.svg().matches("<text").count() > 0);
        assert!(text_nodes(tree.root()) > 0);
    }

    #[test]
    fn dotted_base_names_keep_their_dots() {
        let outputs = OutputFiles::for_base(Path::new("runs/phi.v2"));
        assert_eq!(outputs.pdf, PathBuf::from("runs/phi.v2.pdf"));
        assert_eq!(outputs.png, PathBuf::from("runs/phi.v2.png"));
    }

    #[test]
    fn remove_if_exists_ignores_missing_files() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gone.png");
        remove_if_exists(&path).unwrap();
        fs::write(&path, b"x").unwrap();
        remove_if_exists(&path).unwrap();
        assert!(!path.exists());
    }
}
