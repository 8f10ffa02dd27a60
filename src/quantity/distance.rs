quantity!(Kilometres, suffix: "km", precision: 0);
