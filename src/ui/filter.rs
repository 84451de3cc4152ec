const TOKEN_COUNT: usize = 3;

/// Agency tokens offered as filter checkboxes, in display order.
pub const AGENCY_TOKENS: [&str; TOKEN_COUNT] = ["NASA", "ESA", OTHER_TOKEN];

/// Matches agencies that mention none of the named tokens.
pub const OTHER_TOKEN: &str = "other";

/// Does a single filter token accept this agency string?
///
/// `"other"` means "neither NASA nor ESA"; every other token is a plain
/// substring test, so `"NASA/ESA"` answers to both `NASA` and `ESA`.
pub fn token_matches(token: &str, agency: &str) -> bool {
    if token == OTHER_TOKEN {
        !agency.contains("NASA") && !agency.contains("ESA")
    } else {
        agency.contains(token)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgencyFilter {
    checked: [bool; TOKEN_COUNT],
}

impl Default for AgencyFilter {
    fn default() -> Self {
        Self { checked: [true; TOKEN_COUNT] }
    }
}

impl AgencyFilter {
    pub fn is_checked(&self, token: &str) -> bool {
        self.index(token).map_or(false, |i| self.checked[i])
    }

    /// Returns false for a token that has no checkbox.
    pub fn set(&mut self, token: &str, checked: bool) -> bool {
        match self.index(token) {
            Some(i) => {
                self.checked[i] = checked;
                true
            }
            None => false,
        }
    }

    pub fn tokens(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        AGENCY_TOKENS.iter().copied().zip(self.checked.iter().copied())
    }

    /// Visible when any checked token accepts the agency.
    pub fn accepts(&self, agency: &str) -> bool {
        self.tokens().any(|(token, on)| on && token_matches(token, agency))
    }

    fn index(&self, token: &str) -> Option<usize> {
        AGENCY_TOKENS.iter().position(|t| *t == token)
    }
}
