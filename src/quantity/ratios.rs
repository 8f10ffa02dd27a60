quantity!(Percentage, suffix: "%", precision: 0);

impl Percentage {
    /// Convert the percentage into a ratio, `100 %` being `1.0`.
    #[must_use]
    pub const fn to_ratio(self) -> f64 {
        0.01 * self.0
    }
}
