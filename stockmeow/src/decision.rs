use bigdecimal::BigDecimal;

/// Price above which the sell button lights up.
pub const DEFAULT_SELL_THRESHOLD: i64 = 50;

/// Strictly-greater-than threshold rule. Cosmetic only: no position is held.
#[derive(Debug, Clone, PartialEq)]
pub struct SellRule {
    threshold: BigDecimal,
}

impl SellRule {
    pub fn new(threshold: BigDecimal) -> Self {
        Self { threshold }
    }

    pub fn should_sell(&self, price: &BigDecimal) -> bool {
        should_sell(price, &self.threshold)
    }
}

impl Default for SellRule {
    fn default() -> Self {
        Self::new(BigDecimal::from(DEFAULT_SELL_THRESHOLD))
    }
}

pub fn should_sell(price: &BigDecimal, threshold: &BigDecimal) -> bool {
    price > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn above_threshold_sells() {
        let rule = SellRule::default();
        assert!(rule.should_sell(&dec("50.01")));
        assert!(rule.should_sell(&dec("55.25")));
        assert!(rule.should_sell(&dec("1000")));
    }

    #[test]
    fn at_or_below_threshold_holds() {
        let rule = SellRule::default();
        assert!(!rule.should_sell(&dec("50")));
        assert!(!rule.should_sell(&dec("50.0000")));
        assert!(!rule.should_sell(&dec("49.99")));
        assert!(!rule.should_sell(&dec("0")));
    }

    #[test]
    fn custom_threshold() {
        let rule = SellRule::new(dec("400.5"));
        assert!(!rule.should_sell(&dec("400.5")));
        assert!(rule.should_sell(&dec("400.51")));
    }
}
