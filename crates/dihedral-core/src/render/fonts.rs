use resvg::usvg::fontdb::Database;
use std::sync::Arc;
use tracing::{debug, warn};

const SERIF: &[&str] = &[
    "Times New Roman",
    "DejaVu Serif",
    "Liberation Serif",
    "Noto Serif",
    "FreeSerif",
];
const SANS_SERIF: &[&str] = &[
    "Arial",
    "Helvetica",
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "FreeSans",
];
const MONOSPACE: &[&str] = &[
    "Courier New",
    "DejaVu Sans Mono",
    "Liberation Mono",
    "Noto Sans Mono",
    "FreeMono",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Generic {
    Serif,
    SansSerif,
    Monospace,
}

impl Generic {
    fn parse(family: &str) -> Option<Self> {
        match family.trim().to_ascii_lowercase().as_str() {
            "serif" => Some(Self::Serif),
            "sans-serif" | "sans" => Some(Self::SansSerif),
            "monospace" | "mono" => Some(Self::Monospace),
            _ => None,
        }
    }

    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Serif => SERIF,
            Self::SansSerif => SANS_SERIF,
            Self::Monospace => MONOSPACE,
        }
    }

    fn assign(self, db: &mut Database, face: &str) {
        match self {
            Self::Serif => db.set_serif_family(face),
            Self::SansSerif => db.set_sans_serif_family(face),
            Self::Monospace => db.set_monospace_family(face),
        }
    }
}

/// Font database used to turn figure text into glyphs, plus the family name
/// the charts should ask for.
///
/// usvg drops a `<text>` node whose family matches no installed face, so the
/// requested family is resolved against the database before anything is
/// drawn.
#[derive(Debug, Clone)]
pub struct FontBook {
    db: Arc<Database>,
    family: String,
}

impl FontBook {
    /// Loads the system fonts and resolves `requested` against them.
    pub fn load(requested: &str) -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        debug!("Loaded {} system font face(s)", db.len());
        Self::from_database(db, requested)
    }

    /// Resolves `requested` against an already populated database.
    ///
    /// A generic family (`serif`, `sans-serif`, `monospace`) stays generic in
    /// the figure and is pointed at the first installed candidate face. A
    /// named family that is not installed is replaced by an installed one.
    pub fn from_database(mut db: Database, requested: &str) -> Self {
        let family = match Generic::parse(requested) {
            Some(generic) => {
                match first_installed(&db, generic.candidates()) {
                    Some(face) => {
                        debug!("Font family '{}' resolves to '{}'", requested, face);
                        generic.assign(&mut db, &face);
                    }
                    None => warn!(
                        "No installed font matches '{}'; figure text will be missing",
                        requested
                    ),
                }
                requested.to_string()
            }
            None if is_installed(&db, requested) => requested.to_string(),
            None => match first_installed(&db, SERIF) {
                Some(face) => {
                    warn!(
                        "Font family '{}' is not installed, using '{}' instead",
                        requested, face
                    );
                    face
                }
                None => {
                    warn!(
                        "No installed font matches '{}'; figure text will be missing",
                        requested
                    );
                    requested.to_string()
                }
            },
        };

        Self {
            db: Arc::new(db),
            family,
        }
    }

    /// Family name to write into the figure.
    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.db)
    }

    pub fn is_empty(&self) -> bool {
        self.db.is_empty()
    }
}

fn is_installed(db: &Database, family: &str) -> bool {
    db.faces().any(|face| {
        face.families
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(family))
    })
}

/// First candidate that is installed, or else the first family of any face.
fn first_installed(db: &Database, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .find(|name| is_installed(db, name))
        .map(|name| name.to_string())
        .or_else(|| {
            db.faces()
                .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
        })
}
