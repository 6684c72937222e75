use std::fmt::{Debug, Display, Formatter};

quantity!(
    /// Pounds per kilowatt-hour.
    KilowattHourRate
);

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "£{} /kWh", self.0.normalize())
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}£/kWh", self.0)
    }
}
