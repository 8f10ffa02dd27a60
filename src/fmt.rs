use std::fmt::{Debug, Display, Formatter};

use crate::quantity::time::Months;

/// Duration rounded to whole months, for example, `1 yr 3 mo`.
pub struct FormattedMonths(pub Months);

impl Debug for FormattedMonths {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for FormattedMonths {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let total = self.0.0.round().max(0.0) as u64;
        match (total / 12, total % 12) {
            (0, months) => write!(f, "{months} mo"),
            (years, 0) => write!(f, "{years} yr"),
            (years, months) => write!(f, "{years} yr {months} mo"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_months() {
        assert_eq!(FormattedMonths(Months(5.0)).to_string(), "5 mo");
        assert_eq!(FormattedMonths(Months(24.0)).to_string(), "2 yr");
        assert_eq!(FormattedMonths(Months(15.0)).to_string(), "1 yr 3 mo");
        assert_eq!(FormattedMonths(Months(0.0)).to_string(), "0 mo");
        assert_eq!(FormattedMonths(Months(5.7)).to_string(), "6 mo");
        assert_eq!(FormattedMonths(Months(11.6)).to_string(), "1 yr");
    }
}
