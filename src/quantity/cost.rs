use std::fmt::{Debug, Display, Formatter};

quantity!(
    /// Pounds sterling.
    Cost
);

impl Cost {
    #[must_use]
    pub fn round_to_cents(self) -> Self {
        self.round_to_hundredths()
    }
}

impl Display for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "£{:.2}", self.round_to_cents().0)
    }
}

impl Debug for Cost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}£", self.0)
    }
}
