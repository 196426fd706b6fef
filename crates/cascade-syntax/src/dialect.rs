/// The member of the CSS family a source is written in.
///
/// Chosen per parse and never changed afterwards.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Dialect {
    #[default]
    Css,
    Less,
    Scss,
}

impl Dialect {
    pub fn is_less(self) -> bool {
        self == Self::Less
    }

    pub fn is_scss(self) -> bool {
        self == Self::Scss
    }

    /// Guesses the dialect from a file extension, defaulting to plain CSS.
    pub fn from_extension(extension: &str) -> Self {
        if extension.eq_ignore_ascii_case("less") {
            Self::Less
        } else if extension.eq_ignore_ascii_case("scss") {
            Self::Scss
        } else {
            Self::Css
        }
    }
}
