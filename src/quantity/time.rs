quantity!(
    /// Possibly fractional number of months since the purchase.
    Months, suffix: "mo", precision: 1
);

impl Months {
    pub const PER_YEAR: f64 = 12.0;

    pub fn from_years(years: u32) -> Self {
        Self(f64::from(years) * Self::PER_YEAR)
    }
}
