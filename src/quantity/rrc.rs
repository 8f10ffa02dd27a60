quantity!(
    /// Rolling resistance coefficient, N/kN.
    Rrc, suffix: "N/kN", precision: 1
);
