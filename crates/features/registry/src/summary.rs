use sky_domain::Star;
use std::fmt;
use tracing::debug;

const EMPTY: &str = "List is empty.";

/// Human-readable view of a star list, used for diagnostics.
///
/// Renders as `Star(Size: S, Color: Red, Brightness: Bright), ...`, or
/// `List is empty.` when there is nothing to show.
#[derive(Debug, Clone, Copy)]
pub struct SkySummary<'a> {
    stars: &'a [Star],
}

impl<'a> SkySummary<'a> {
    #[must_use]
    pub const fn new(stars: &'a [Star]) -> Self {
        Self { stars }
    }

    #[must_use]
    pub fn bright_count(&self) -> usize {
        self.stars.iter().filter(|star| star.brightness().is_bright()).count()
    }

    /// The bright count as text, or `List is empty.`.
    #[must_use]
    pub fn bright_label(&self) -> String {
        if self.stars.is_empty() { EMPTY.to_owned() } else { self.bright_count().to_string() }
    }

    pub(crate) fn emit(&self) {
        debug!(stars = %self, bright = %self.bright_label(), "Sky summary");
    }
}

impl fmt::Display for SkySummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((first, rest)) = self.stars.split_first() else {
            return f.write_str(EMPTY);
        };

        write!(f, "{first}")?;
        for star in rest {
            write!(f, ", {star}")?;
        }
        Ok(())
    }
}
