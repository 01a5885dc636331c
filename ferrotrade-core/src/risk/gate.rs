//! Pre-trade risk checks (spec §4.8, C9): quantity cap, price-deviation
//! band, kill-switch, rate limit. Grounded on the layered-check structure
//! of `bog-core::risk::pre_trade::PreTradeValidator::validate`, specialized
//! down to the spec's exact four checks and to `Price`/`Quantity` ticks
//! instead of `rust_decimal::Decimal`.

use crate::core::errors::InvalidConfig;
use crate::core::fixed_point::{Price, Quantity};
use crate::core::types::OrderCommand;
use crate::resilience::KillSwitch;
use crate::risk::rate_limiter::TokenBucket;

/// Construction-time-validated risk limits.
#[derive(Debug, Clone, Copy)]
pub struct RiskConfig {
    pub max_order_qty: Quantity,
    pub max_price_deviation: Price,
    pub max_orders_per_sec: u32,
}

impl RiskConfig {
    pub fn new(
        max_order_qty: Quantity,
        max_price_deviation: Price,
        max_orders_per_sec: u32,
    ) -> Result<Self, InvalidConfig> {
        if max_order_qty.ticks() <= 0 {
            return Err(InvalidConfig::NonPositiveRiskLimit {
                name: "max_order_qty",
                value: max_order_qty.ticks(),
            });
        }
        if max_price_deviation.ticks() <= 0 {
            return Err(InvalidConfig::NonPositiveRiskLimit {
                name: "max_price_deviation",
                value: max_price_deviation.ticks(),
            });
        }
        if max_orders_per_sec == 0 {
            return Err(InvalidConfig::NonPositiveRiskLimit {
                name: "max_orders_per_sec",
                value: 0,
            });
        }
        Ok(Self {
            max_order_qty,
            max_price_deviation,
            max_orders_per_sec,
        })
    }
}

/// Stateful pre-trade gate: qty cap, price-deviation band, kill-switch
/// read, and a per-process token-bucket rate limit. Owned by the engine
/// thread; `check_new_order` is not safe to call concurrently from two
/// threads (the token bucket isn't synchronized — see
/// [`crate::risk::rate_limiter::TokenBucket`]).
pub struct RiskGate {
    config: RiskConfig,
    kill_switch: KillSwitch,
    bucket: TokenBucket,
}

impl RiskGate {
    pub fn new(config: RiskConfig, kill_switch: KillSwitch) -> Result<Self, InvalidConfig> {
        let bucket = TokenBucket::new(config.max_orders_per_sec)?;
        Ok(Self {
            config,
            kill_switch,
            bucket,
        })
    }

    /// `true` iff the order clears every check: qty cap, price-deviation
    /// band (compared on raw ticks against `ref_price`), kill-switch
    /// disarmed, and rate limit. Checks short-circuit in the order spec
    /// §4.8 lists them in, so a rejected order on an earlier check never
    /// consumes a rate-limit token.
    pub fn check_new_order(&mut self, cmd: &OrderCommand, ref_price: Price) -> bool {
        cmd.qty.ticks() <= self.config.max_order_qty.ticks()
            && (cmd.price.ticks() - ref_price.ticks()).abs() <= self.config.max_price_deviation.ticks()
            && !self.kill_switch.is_armed()
            && self.bucket.allow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{OrderId, Side, SymbolId};

    fn gate(max_qty: f64, max_dev: f64, rate: u32) -> RiskGate {
        let config = RiskConfig::new(
            Quantity::from_float(max_qty),
            Price::from_float(max_dev),
            rate,
        )
        .unwrap();
        RiskGate::new(config, KillSwitch::new()).unwrap()
    }

    fn cmd(price: f64, qty: f64) -> OrderCommand {
        OrderCommand {
            symbol_id: SymbolId(1),
            order_id: OrderId(1),
            price: Price::from_float(price),
            qty: Quantity::from_float(qty),
            side: Side::Buy,
        }
    }

    /// S5 from spec §8: fat-finger rejection.
    #[test]
    fn rejects_fat_finger_price_deviation() {
        let mut gate = gate(1.0, 0.50, 100);
        let passes = gate.check_new_order(&cmd(105.00, 0.5), Price::from_float(100.00));
        assert!(!passes);
    }

    #[test]
    fn rejects_qty_over_cap() {
        let mut gate = gate(1.0, 10.0, 100);
        let passes = gate.check_new_order(&cmd(100.0, 2.0), Price::from_float(100.0));
        assert!(!passes);
    }

    #[test]
    fn accepts_within_all_bounds() {
        let mut gate = gate(1.0, 1.0, 100);
        let passes = gate.check_new_order(&cmd(100.2, 0.5), Price::from_float(100.0));
        assert!(passes);
    }

    /// S6 from spec §8: kill-switch halts trading.
    #[test]
    fn kill_switch_rejects_otherwise_valid_order() {
        let config = RiskConfig::new(
            Quantity::from_float(1.0),
            Price::from_float(5.0),
            100,
        )
        .unwrap();
        let kill_switch = KillSwitch::new();
        let mut gate = RiskGate::new(config, kill_switch.clone()).unwrap();

        assert!(gate.check_new_order(&cmd(100.0, 0.1), Price::from_float(100.0)));
        kill_switch.trigger("manual halt");
        assert!(!gate.check_new_order(&cmd(100.0, 0.1), Price::from_float(100.0)));
    }

    #[test]
    fn rate_limit_rejects_once_tokens_are_exhausted() {
        let mut gate = gate(100.0, 100.0, 2);
        assert!(gate.check_new_order(&cmd(100.0, 0.1), Price::from_float(100.0)));
        assert!(gate.check_new_order(&cmd(100.0, 0.1), Price::from_float(100.0)));
        assert!(!gate.check_new_order(&cmd(100.0, 0.1), Price::from_float(100.0)));
    }

    #[test]
    fn price_deviation_is_compared_on_raw_ticks_inclusive() {
        let mut gate = gate(100.0, 0.50, 100);
        assert!(gate.check_new_order(&cmd(100.50, 0.1), Price::from_float(100.00)));
        assert!(!gate.check_new_order(&cmd(100.50000001, 0.1), Price::from_float(100.00)));
    }
}
