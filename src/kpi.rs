use crate::models::{AggregateResult, RevenueMix, Scenario, ScenarioInputs, TicketBand};

pub const DEFAULT_PRICE: f64 = 78.0;
pub const DEFAULT_ATTACH: f64 = 57.0;
pub const MIN_PRICE: f64 = 50.0;
pub const MAX_PRICE: f64 = 120.0;
/// Average over-the-counter basket, MXN.
pub const AVG_OTC_BASKET: f64 = 45.0;

const TICKET_LOW_OFFSET: f64 = 35.0;
const TICKET_HIGH_OFFSET: f64 = 55.0;

pub fn clamp_price(price: f64) -> f64 {
    price.clamp(MIN_PRICE, MAX_PRICE)
}

pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Fixed-offset ticket band around the consultation price.
pub fn calc_ticket(price: f64) -> TicketBand {
    TicketBand {
        low: (price + TICKET_LOW_OFFSET).round() as i64,
        high: (price + TICKET_HIGH_OFFSET).round() as i64,
    }
}

/// Split of expected revenue between the consultation and OTC add-ons.
///
/// The two display values are rounded independently, so they can sum to 99 or 101.
pub fn revenue_mix(price: f64, attach_pct: f64) -> RevenueMix {
    let attach = clamp_percent(attach_pct) / 100.0;
    let consult = price;
    let otc = attach * AVG_OTC_BASKET;
    let total = consult + otc;
    let consult_share = if total > 0.0 {
        clamp_percent(consult / total * 100.0)
    } else {
        100.0
    };
    let otc_share = clamp_percent(100.0 - consult_share);

    RevenueMix {
        consult,
        otc,
        consult_share,
        otc_share,
        consult_display: consult_share.round() as i64,
        otc_display: otc_share.round() as i64,
    }
}

impl ScenarioInputs {
    /// Applies the defaults and clamps both inputs into range.
    pub fn resolve(&self) -> Scenario {
        // An explicit 0 is kept (attach 0, price clamped to 50); only absent or NaN
        // inputs fall back to the defaults.
        Scenario {
            price: clamp_price(usable(self.price).unwrap_or(DEFAULT_PRICE)),
            attach: clamp_percent(usable(self.attach).unwrap_or(DEFAULT_ATTACH)),
        }
    }
}

/// Scenario shown once survey data exists.
///
/// Survey averages replace the static inputs field by field, rounded to whole units;
/// with neither average present the static scenario is used as is.
pub fn apply_aggregate(inputs: &ScenarioInputs, aggregate: &AggregateResult) -> Scenario {
    if aggregate.psm_avg.is_none() && aggregate.attach_avg.is_none() {
        return inputs.resolve();
    }

    let price = aggregate
        .psm_avg
        .or(usable(inputs.price))
        .unwrap_or(DEFAULT_PRICE);
    let attach = aggregate
        .attach_avg
        .or(usable(inputs.attach))
        .unwrap_or(DEFAULT_ATTACH);

    Scenario {
        price: clamp_price(price.round()),
        attach: clamp_percent(attach.round()),
    }
}

fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|value| !value.is_nan())
}
