use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::quantity::cost::Cost;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    #[value(name = "PLN")]
    Pln,

    #[value(name = "EUR")]
    Eur,

    #[value(name = "USD")]
    Usd,

    #[value(name = "GBP")]
    Gbp,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum SymbolPosition {
    Before,
    After,
}

impl Currency {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Pln => "PLN",
            Self::Eur => "EUR",
            Self::Usd => "USD",
            Self::Gbp => "GBP",
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Pln => "zł",
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }

    const fn position(self) -> SymbolPosition {
        match self {
            Self::Pln => SymbolPosition::After,
            Self::Eur | Self::Usd | Self::Gbp => SymbolPosition::Before,
        }
    }

    /// Format the amount with two decimals and the currency symbol, for example, `390.00 zł`.
    #[must_use]
    pub fn format(self, amount: Cost) -> String {
        FormattedCost { amount, currency: self }.to_string()
    }
}

impl Display for Currency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code(), self.symbol())
    }
}

/// Amount of money together with its currency symbol.
#[derive(Copy, Clone, Debug)]
pub struct FormattedCost {
    pub amount: Cost,
    pub currency: Currency,
}

impl Display for FormattedCost {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let amount = self.amount.0;
        let symbol = self.currency.symbol();
        match self.currency.position() {
            SymbolPosition::Before => write!(f, "{symbol}{amount:.2}"),
            SymbolPosition::After => write!(f, "{amount:.2} {symbol}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        assert_eq!(Currency::Pln.format(Cost(390.0)), "390.00 zł");
        assert_eq!(Currency::Eur.format(Cost(12.346)), "€12.35");
        assert_eq!(Currency::Usd.format(Cost(-50.0)), "$-50.00");
        assert_eq!(Currency::Gbp.format(Cost(0.0)), "£0.00");
    }

    #[test]
    fn test_serde_uses_codes() -> anyhow::Result<()> {
        assert_eq!(serde_json::to_string(&Currency::Usd)?, r#""USD""#);
        assert_eq!(serde_json::from_str::<Currency>(r#""GBP""#)?, Currency::Gbp);
        Ok(())
    }
}
