quantity!(
    /// Money in whatever currency the user works with.
    Cost, precision: 2
);

impl Cost {
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0.0
    }
}
