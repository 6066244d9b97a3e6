//! The detection rules, one function per rule, in evaluation order.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use wb_domain::{BillingBasis, Money};

use crate::finding::{Finding, FindingCategory, FindingKind, Severity};
use crate::DetectionContext;

/// Allowed gap between the submitted and the computed bill, in percent.
pub const BILL_TOLERANCE_PERCENT: Decimal = dec!(5);

/// Allowed period-over-period consumption change, in percent either way.
pub const CONSUMPTION_CHANGE_PERCENT: Decimal = dec!(30);

/// Share of the allocation below which a household looks over-counted.
pub const ALLOCATION_UNDERUSE_RATIO: Decimal = dec!(0.70);

/// Household size the under-use heuristic applies to.
pub const UNDERUSE_HOUSEHOLD_SIZE: u32 = 2;

/// Rounds a percentage for display, half away from zero like money amounts.
fn shown_percent(pct: Decimal) -> Decimal {
    pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) type Rule = fn(&DetectionContext<'_>) -> Option<Finding>;

pub(crate) const RULES: [Rule; 6] = [
    estimated_reading,
    bill_mismatch,
    consumption_change,
    allocation_underuse,
    disability_eligibility,
    meter_reading_note,
];

fn estimated_reading(ctx: &DetectionContext<'_>) -> Option<Finding> {
    if ctx.observations.billing_basis != Some(BillingBasis::Estimated) {
        return None;
    }
    Some(Finding {
        category: FindingCategory::Estimation,
        kind: FindingKind::Error,
        severity: Severity::High,
        title: "Bill based on an estimated reading".to_string(),
        description: "The utility estimated this period's consumption instead of reading the \
                      meter, so the charge may not match actual use."
            .to_string(),
        recommended_action: "Photograph the meter with the date visible and ask the utility to \
                             reissue the bill from the actual reading."
            .to_string(),
        figure: None,
    })
}

fn bill_mismatch(ctx: &DetectionContext<'_>) -> Option<Finding> {
    let actual = ctx.observations.actual_bill_amount.filter(Money::is_positive)?;
    let expected = ctx.billing.total_price;
    let diff = actual - expected;

    // A zero expected total makes any positive bill an overcharge.
    let gap = diff.abs().percent_of(expected);
    if gap.is_some_and(|p| p <= BILL_TOLERANCE_PERCENT) {
        return None;
    }
    let pct = gap
        .map(|p| format!(" ({}%)", shown_percent(p)))
        .unwrap_or_default();

    if diff.is_positive() {
        Some(Finding {
            category: FindingCategory::Overcharge,
            kind: FindingKind::Error,
            severity: Severity::High,
            title: "Bill higher than expected".to_string(),
            description: format!(
                "The bill of {actual} is {}{pct} above the expected {expected}.",
                diff.abs()
            ),
            recommended_action: "Check the household size and tariff on the bill and file a \
                                 correction request with the utility."
                .to_string(),
            figure: Some(diff.amount()),
        })
    } else {
        Some(Finding {
            category: FindingCategory::Undercharge,
            kind: FindingKind::Warning,
            severity: Severity::Medium,
            title: "Bill lower than expected".to_string(),
            description: format!(
                "The bill of {actual} is {}{pct} below the expected {expected}. The \
                 difference may be recovered in a later bill.",
                diff.abs()
            ),
            recommended_action: "Set the difference aside and compare the next bill's meter \
                                 readings with your own."
                .to_string(),
            figure: Some(diff.amount()),
        })
    }
}

fn consumption_change(ctx: &DetectionContext<'_>) -> Option<Finding> {
    let previous = ctx
        .observations
        .previous_consumption
        .filter(|p| *p > Decimal::ZERO)?;
    let current = ctx.input.consumption();
    let (shown_previous, shown_current) = (previous.normalize(), current.normalize());
    // Only a rise can overflow, since a fall bottoms out at -100%.
    let change = (current - previous)
        .checked_div(previous)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::MAX);
    let shown = shown_percent(change.abs());

    if change > CONSUMPTION_CHANGE_PERCENT {
        Some(Finding {
            category: FindingCategory::ConsumptionSpike,
            kind: FindingKind::Warning,
            severity: Severity::High,
            title: "Sharp rise in consumption".to_string(),
            description: format!(
                "Consumption rose {shown}% from {shown_previous} m3 to {shown_current} m3 since \
                 the previous period."
            ),
            recommended_action: "Close all taps and watch the meter for 30 minutes; if it \
                                 moves, look for a leak in toilets, taps and garden lines."
                .to_string(),
            figure: Some(change),
        })
    } else if change < -CONSUMPTION_CHANGE_PERCENT {
        Some(Finding {
            category: FindingCategory::ConsumptionDrop,
            kind: FindingKind::Warning,
            severity: Severity::Medium,
            title: "Sharp drop in consumption".to_string(),
            description: format!(
                "Consumption fell {shown}% from {shown_previous} m3 to {shown_current} m3 since \
                 the previous period. The previous bill may have been over-estimated."
            ),
            recommended_action: "Compare the previous bill's reading with your own records and \
                                 ask for a credit if it was too high."
                .to_string(),
            figure: Some(change),
        })
    } else {
        None
    }
}

fn allocation_underuse(ctx: &DetectionContext<'_>) -> Option<Finding> {
    if ctx.input.persons() != UNDERUSE_HOUSEHOLD_SIZE {
        return None;
    }
    let usage = ctx
        .billing
        .reduced_consumption
        .checked_div(ctx.billing.allocation)?;
    if usage >= ALLOCATION_UNDERUSE_RATIO {
        return None;
    }
    Some(Finding {
        category: FindingCategory::AllocationUnderuse,
        kind: FindingKind::Recommendation,
        severity: Severity::Low,
        title: "Allocation mostly unused".to_string(),
        description: format!(
            "Only {}% of the {} m3 reduced-rate allocation was used. Two persons is the \
             utility's default household size and may not be your actual occupancy.",
            shown_percent(usage * Decimal::ONE_HUNDRED),
            ctx.billing.allocation.normalize()
        ),
        recommended_action: "Confirm the number of residents registered with the utility and \
                             update it if it is wrong."
            .to_string(),
        figure: None,
    })
}

fn disability_eligibility(ctx: &DetectionContext<'_>) -> Option<Finding> {
    if ctx.input.has_disability_benefit() || ctx.input.consumption() <= ctx.billing.allocation {
        return None;
    }
    Some(Finding {
        category: FindingCategory::DisabilityEligibility,
        kind: FindingKind::Recommendation,
        severity: Severity::Medium,
        title: "Check eligibility for an extra allocation".to_string(),
        description: format!(
            "{} m3 of this bill is charged at the full rate. Households receiving a disability \
             benefit get an additional reduced-rate allocation.",
            (ctx.input.consumption() - ctx.billing.allocation).normalize()
        ),
        recommended_action: "If anyone in the household receives a disability benefit, submit \
                             the approval to the utility."
            .to_string(),
        figure: None,
    })
}

fn meter_reading_note(ctx: &DetectionContext<'_>) -> Option<Finding> {
    let reading = ctx
        .observations
        .current_meter_reading
        .filter(|r| *r > Decimal::ZERO)?;
    Some(Finding {
        category: FindingCategory::MeterReadingNote,
        kind: FindingKind::Recommendation,
        severity: Severity::Low,
        title: "Your meter reading".to_string(),
        description: format!("You recorded a meter reading of {} m3.", reading.normalize()),
        recommended_action: "Compare it with the current reading printed on the bill."
            .to_string(),
        figure: Some(reading),
    })
}
