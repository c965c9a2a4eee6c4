// Response shaping: upstream FMP JSON -> documented tool output
//
// All functions here are pure. Missing required strings become "", missing
// required numbers become 0, and a body that is not an array where one is
// expected shapes to an empty list.

use crate::types::{
    AnalystConsensus, AnalystRating, EarningsCalendarEvent, EarningsReport, IndicatorKind,
    IndicatorOutput, IndicatorValue, InsiderActivity, Symbol,
};
use crate::window::DateWindow;
use serde_json::Value;

fn records(raw: &Value) -> &[Value] {
    raw.as_array().map(Vec::as_slice).unwrap_or_default()
}

/// First value found under any of `keys`, skipping nulls
fn lookup<'a>(item: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find(|v| !v.is_null())
}

fn text(item: &Value, keys: &[&str]) -> Option<String> {
    lookup(item, keys).and_then(Value::as_str).map(str::to_string)
}

fn number(item: &Value, keys: &[&str]) -> Option<f64> {
    lookup(item, keys).and_then(Value::as_f64)
}

fn integer(item: &Value, keys: &[&str]) -> Option<i64> {
    let value = lookup(item, keys)?;
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

/// Numbers or numeric strings
fn lenient_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// EPS surprise records from `/earnings-surprises/{symbol}`
pub fn shape_eps_surprises(raw: &Value) -> Vec<EarningsReport> {
    records(raw).iter().map(shape_eps_surprise).collect()
}

fn shape_eps_surprise(item: &Value) -> EarningsReport {
    let actual = number(item, &["actualEarningResult", "eps"]);
    let estimated = number(item, &["estimatedEarning", "epsEstimated"]);

    let derived = match (actual, estimated) {
        (Some(actual), Some(estimated)) => Some((actual - estimated, estimated)),
        _ => None,
    };

    let surprise = number(item, &["surprise"]).or(derived.map(|(diff, _)| diff));
    let surprise_percentage = number(item, &["surprisePercentage"]).or_else(|| {
        derived
            .filter(|(_, estimated)| *estimated != 0.0)
            .map(|(diff, estimated)| diff / estimated.abs() * 100.0)
    });

    EarningsReport {
        symbol: text(item, &["symbol"]).unwrap_or_default(),
        date: text(item, &["date"]).unwrap_or_default(),
        eps: actual.unwrap_or(0.0),
        eps_estimated: estimated.unwrap_or(0.0),
        time: text(item, &["time"]),
        revenue: number(item, &["revenue"]),
        revenue_estimated: number(item, &["revenueEstimated"]),
        updated_from_date: text(item, &["updatedFromDate"]),
        surprise,
        surprise_percentage,
        quarter: integer(item, &["quarter"]),
        year: integer(item, &["year"]),
    }
}

/// Indicator series from `/technical_indicator/{timeframe}/{symbol}`,
/// restricted to `window`
pub fn shape_indicator(
    symbol: &Symbol,
    kind: IndicatorKind,
    time_period: u32,
    raw: &Value,
    window: &DateWindow,
) -> IndicatorOutput {
    let keys = [kind.as_str(), "value", "indicator_value"];

    let values = records(raw)
        .iter()
        .filter_map(|item| {
            let value = keys
                .iter()
                .filter_map(|key| item.get(*key))
                .find_map(lenient_number)?;
            let date = text(item, &["date"]).unwrap_or_default();
            Some(IndicatorValue { date, value })
        })
        .filter(|v| window.contains_str(&v.date))
        .collect();

    IndicatorOutput {
        symbol: symbol.to_string(),
        indicator: kind,
        time_period,
        values,
    }
}

/// Consensus from `/price-target-consensus` plus optional per-analyst
/// targets from `/price-target`
pub fn shape_price_targets(
    symbol: &Symbol,
    consensus: &Value,
    ratings: Option<&Value>,
) -> AnalystConsensus {
    let empty = Value::Null;
    let item = match consensus {
        Value::Array(items) => items.first().unwrap_or(&empty),
        other => other,
    };

    AnalystConsensus {
        symbol: symbol.to_string(),
        target_consensus: number(item, &["targetConsensus"]).unwrap_or(0.0),
        target_high: number(item, &["targetHigh"]).unwrap_or(0.0),
        target_low: number(item, &["targetLow"]).unwrap_or(0.0),
        target_median: number(item, &["targetMedian"]),
        number_of_analysts: integer(item, &["numberOfAnalysts"])
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0),
        last_analyst_consensus_date: text(item, &["lastAnalystConsensusDate"]).unwrap_or_default(),
        rating_consensus: text(item, &["ratingConsensus"]),
        ratings: ratings.map(shape_analyst_ratings),
    }
}

pub fn shape_analyst_ratings(raw: &Value) -> Vec<AnalystRating> {
    records(raw)
        .iter()
        .map(|item| AnalystRating {
            analyst_name: text(item, &["analystName"]),
            analyst_company: text(item, &["analystCompany"]),
            date: text(item, &["publishedDate", "date"]).unwrap_or_default(),
            rating: text(item, &["rating", "newGrade"]).unwrap_or_default(),
            price_target: number(item, &["priceTarget", "adjPriceTarget"]).unwrap_or(0.0),
        })
        .collect()
}

/// Insider transactions from `/insider-trading`
pub fn shape_insider_trading(symbol: &Symbol, raw: &Value) -> Vec<InsiderActivity> {
    records(raw)
        .iter()
        .map(|item| InsiderActivity {
            symbol: text(item, &["symbol"]).unwrap_or_else(|| symbol.to_string()),
            filing_date: text(item, &["filingDate"]).unwrap_or_default(),
            transaction_date: text(item, &["transactionDate"]).unwrap_or_default(),
            reporter_name: text(item, &["reporterName", "reportingName"]).unwrap_or_default(),
            reporter_title: text(item, &["reporterTitle", "typeOfOwner"]).unwrap_or_default(),
            transaction_type: text(item, &["transactionType"]).unwrap_or_default(),
            shares: number(item, &["securitiesTransacted", "shares"]).unwrap_or(0.0),
            price: number(item, &["price"]),
            value: number(item, &["value"]),
            url: text(item, &["link", "url"]),
        })
        .collect()
}

/// Calendar events from `/earning_calendar` or the per-symbol history,
/// restricted to `window`
pub fn shape_earnings_calendar(raw: &Value, window: &DateWindow) -> Vec<EarningsCalendarEvent> {
    records(raw)
        .iter()
        .filter_map(|item| {
            let date = text(item, &["date"]).unwrap_or_default();
            if !window.contains_str(&date) {
                return None;
            }

            Some(EarningsCalendarEvent {
                symbol: text(item, &["symbol"]).unwrap_or_default(),
                date,
                eps: number(item, &["eps"]),
                eps_estimated: number(item, &["epsEstimated"]),
                time: text(item, &["time"]),
                revenue: number(item, &["revenue"]),
                revenue_estimated: number(item, &["revenueEstimated"]),
                quarter: integer(item, &["quarter"]),
                year: integer(item, &["year"]),
            })
        })
        .collect()
}
