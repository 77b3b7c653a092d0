//! # Schema Validation
//!
//! Single-pass structural validation of a raw checkout document. The
//! validator walks the decoded JSON, checks every field independently, and
//! collects all violations before failing, so one response shows every
//! invalid field. Unknown keys are rejected at every nesting level.
//!
//! Item fields are strictly typed: a value of the wrong JSON type is
//! rejected, never coerced ("5" is not an integer, 2.5 is not a whole
//! number). Address strings are trimmed of surrounding whitespace before
//! their length, pattern, and literal rules apply.

use crate::checkout::{Address, CheckoutRequest, LineItem};
use crate::error::{CheckoutError, PathSeg, Rule, Violation};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Minimum quantity per line item
pub const QTY_MIN: i64 = 1;
/// Maximum quantity per line item
pub const QTY_MAX: i64 = 50;
/// Minimum characters in `address.line1`
pub const MIN_LINE1_CHARS: usize = 3;
/// Minimum characters in `address.city`
pub const MIN_CITY_CHARS: usize = 2;
/// Minimum characters in `payment_token`
pub const MIN_PAYMENT_TOKEN_CHARS: usize = 10;
/// Two-letter uppercase state code
pub const STATE_PATTERN: &str = "^[A-Z]{2}$";
/// ZIP or ZIP+4
pub const ZIP_PATTERN: &str = r"^\d{5}(-\d{4})?$";
/// The only accepted country code
pub const COUNTRY_LITERAL: &str = "US";

const TOP_LEVEL_KEYS: [&str; 4] = ["items", "address", "payment_token", "total_cents"];
const ITEM_KEYS: [&str; 3] = ["sku", "qty", "price_cents"];

fn state_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(STATE_PATTERN).expect("state pattern compiles"))
}

fn zip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ZIP_PATTERN).expect("zip pattern compiles"))
}

/// Validate a raw checkout document into a typed `CheckoutRequest`.
///
/// On failure, returns `CheckoutError::Schema` carrying every violation in
/// discovery order: declared fields in schema order, then unknown keys of
/// the same object. Re-validating the same document yields the identical
/// list.
pub fn validate_checkout(raw: &Value) -> Result<CheckoutRequest, CheckoutError> {
    let mut violations = Vec::new();

    let Some(obj) = raw.as_object() else {
        violations.push(
            Violation::new(
                Vec::new(),
                Rule::InvalidType {
                    expected: "an object",
                },
            )
            .with_input(raw),
        );
        return Err(CheckoutError::Schema(violations));
    };

    let items = validate_items(obj.get("items"), &mut violations);
    let address = validate_address(obj.get("address"), &mut violations);
    let payment_token = validate_payment_token(obj.get("payment_token"), &mut violations);
    let total_cents = validate_total_cents(obj.get("total_cents"), &mut violations);
    reject_unknown_keys(obj, &TOP_LEVEL_KEYS, &[], &mut violations);

    match (items, address, payment_token, total_cents) {
        (Some(items), Some(address), Some(payment_token), Some(total_cents))
            if violations.is_empty() =>
        {
            Ok(CheckoutRequest {
                items,
                address,
                payment_token,
                total_cents,
            })
        }
        _ => Err(CheckoutError::Schema(violations)),
    }
}

// =============================================================================
// Items
// =============================================================================

fn validate_items(value: Option<&Value>, out: &mut Vec<Violation>) -> Option<Vec<LineItem>> {
    let Some(value) = value else {
        out.push(Violation::new(vec!["items".into()], Rule::Missing));
        return None;
    };
    let Some(entries) = value.as_array() else {
        out.push(
            Violation::new(
                vec!["items".into()],
                Rule::InvalidType {
                    expected: "an array",
                },
            )
            .with_input(value),
        );
        return None;
    };
    if entries.is_empty() {
        out.push(Violation::new(vec!["items".into()], Rule::EmptyItems).with_input(value));
        return None;
    }

    let before = out.len();
    let mut items = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        if let Some(item) = validate_item(index, entry, out) {
            items.push(item);
        }
    }
    (out.len() == before).then_some(items)
}

fn item_loc(index: usize, field: &str) -> Vec<PathSeg> {
    vec!["items".into(), index.into(), field.into()]
}

fn validate_item(index: usize, value: &Value, out: &mut Vec<Violation>) -> Option<LineItem> {
    let Some(obj) = value.as_object() else {
        out.push(
            Violation::new(
                vec!["items".into(), index.into()],
                Rule::InvalidType {
                    expected: "an object",
                },
            )
            .with_input(value),
        );
        return None;
    };

    let sku = match obj.get("sku") {
        None => {
            out.push(Violation::new(item_loc(index, "sku"), Rule::Missing));
            None
        }
        Some(value) => match value.as_str() {
            None => {
                out.push(
                    Violation::new(
                        item_loc(index, "sku"),
                        Rule::InvalidType {
                            expected: "a string",
                        },
                    )
                    .with_input(value),
                );
                None
            }
            Some(sku) if sku.is_empty() => {
                out.push(Violation::new(item_loc(index, "sku"), Rule::Empty).with_input(value));
                None
            }
            Some(sku) => Some(sku.to_string()),
        },
    };

    let qty = match strict_int(obj.get("qty"), item_loc(index, "qty"), out) {
        Some(n) if (QTY_MIN..=QTY_MAX).contains(&n) => Some(n as u32),
        Some(n) => {
            out.push(
                Violation::new(
                    item_loc(index, "qty"),
                    Rule::OutOfRange {
                        min: QTY_MIN,
                        max: QTY_MAX,
                    },
                )
                .with_input(&Value::from(n)),
            );
            None
        }
        None => None,
    };

    let price_cents = match strict_int(obj.get("price_cents"), item_loc(index, "price_cents"), out)
    {
        Some(n) if n >= 0 => Some(n),
        Some(n) => {
            out.push(
                Violation::new(item_loc(index, "price_cents"), Rule::TooSmall { min: 0 })
                    .with_input(&Value::from(n)),
            );
            None
        }
        None => None,
    };

    reject_unknown_keys(obj, &ITEM_KEYS, &["items".into(), index.into()], out);

    Some(LineItem {
        sku: sku?,
        qty: qty?,
        price_cents: price_cents?,
    })
}

/// Strict integer read: the JSON value itself must be a whole number.
/// Strings, booleans, nulls, and fractional numbers are type errors.
fn strict_int(value: Option<&Value>, loc: Vec<PathSeg>, out: &mut Vec<Violation>) -> Option<i64> {
    let Some(value) = value else {
        out.push(Violation::new(loc, Rule::Missing));
        return None;
    };
    match value.as_i64() {
        Some(n) => Some(n),
        None => {
            out.push(
                Violation::new(
                    loc,
                    Rule::InvalidType {
                        expected: "an integer",
                    },
                )
                .with_input(value),
            );
            None
        }
    }
}

// =============================================================================
// Address
// =============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Presence {
    Required,
    Optional,
}

type FieldRule = fn(&str) -> Option<Rule>;

/// Constraint table for address fields, in schema declaration order.
/// Each entry is checked independently; failures accumulate rather than
/// short-circuit. Checks run on the trimmed value.
const ADDRESS_FIELDS: [(&str, Presence, FieldRule); 6] = [
    ("line1", Presence::Required, line1_rule),
    ("line2", Presence::Optional, free_text_rule),
    ("city", Presence::Required, city_rule),
    ("state", Presence::Required, state_rule),
    ("zip", Presence::Required, zip_rule),
    ("country", Presence::Required, country_rule),
];

fn line1_rule(value: &str) -> Option<Rule> {
    (value.chars().count() < MIN_LINE1_CHARS).then_some(Rule::TooShort {
        min: MIN_LINE1_CHARS,
    })
}

fn free_text_rule(_: &str) -> Option<Rule> {
    None
}

fn city_rule(value: &str) -> Option<Rule> {
    (value.chars().count() < MIN_CITY_CHARS).then_some(Rule::TooShort {
        min: MIN_CITY_CHARS,
    })
}

fn state_rule(value: &str) -> Option<Rule> {
    (!state_re().is_match(value)).then_some(Rule::PatternMismatch {
        pattern: STATE_PATTERN,
    })
}

fn zip_rule(value: &str) -> Option<Rule> {
    (!zip_re().is_match(value)).then_some(Rule::PatternMismatch {
        pattern: ZIP_PATTERN,
    })
}

fn country_rule(value: &str) -> Option<Rule> {
    (value != COUNTRY_LITERAL).then_some(Rule::LiteralMismatch {
        expected: COUNTRY_LITERAL,
    })
}

fn address_loc(field: &str) -> Vec<PathSeg> {
    vec!["address".into(), field.into()]
}

fn validate_address(value: Option<&Value>, out: &mut Vec<Violation>) -> Option<Address> {
    let Some(value) = value else {
        out.push(Violation::new(vec!["address".into()], Rule::Missing));
        return None;
    };
    let Some(obj) = value.as_object() else {
        out.push(
            Violation::new(
                vec!["address".into()],
                Rule::InvalidType {
                    expected: "an object",
                },
            )
            .with_input(value),
        );
        return None;
    };

    let before = out.len();
    let mut parsed: HashMap<&str, String> = HashMap::new();

    for (name, presence, rule) in ADDRESS_FIELDS {
        let field = match obj.get(name) {
            None | Some(Value::Null) if presence == Presence::Optional => continue,
            None => {
                out.push(Violation::new(address_loc(name), Rule::Missing));
                continue;
            }
            Some(field) => field,
        };
        let Some(text) = field.as_str() else {
            out.push(
                Violation::new(
                    address_loc(name),
                    Rule::InvalidType {
                        expected: "a string",
                    },
                )
                .with_input(field),
            );
            continue;
        };
        let trimmed = text.trim();
        if let Some(broken) = rule(trimmed) {
            out.push(Violation::new(address_loc(name), broken).with_input(field));
            continue;
        }
        parsed.insert(name, trimmed.to_string());
    }

    let allowed: Vec<&str> = ADDRESS_FIELDS.iter().map(|(name, _, _)| *name).collect();
    reject_unknown_keys(obj, &allowed, &["address".into()], out);

    if out.len() != before {
        return None;
    }
    Some(Address {
        line1: parsed.remove("line1")?,
        line2: parsed.remove("line2"),
        city: parsed.remove("city")?,
        state: parsed.remove("state")?,
        zip: parsed.remove("zip")?,
        country: parsed.remove("country")?,
    })
}

// =============================================================================
// Top-level scalars
// =============================================================================

fn validate_payment_token(value: Option<&Value>, out: &mut Vec<Violation>) -> Option<String> {
    let Some(value) = value else {
        out.push(Violation::new(vec!["payment_token".into()], Rule::Missing));
        return None;
    };
    let Some(token) = value.as_str() else {
        out.push(
            Violation::new(
                vec!["payment_token".into()],
                Rule::InvalidType {
                    expected: "a string",
                },
            )
            .with_input(value),
        );
        return None;
    };
    if token.chars().count() < MIN_PAYMENT_TOKEN_CHARS {
        out.push(
            Violation::new(
                vec!["payment_token".into()],
                Rule::TooShort {
                    min: MIN_PAYMENT_TOKEN_CHARS,
                },
            )
            .with_input(value),
        );
        return None;
    }
    Some(token.to_string())
}

fn validate_total_cents(value: Option<&Value>, out: &mut Vec<Violation>) -> Option<i64> {
    let total = strict_int(value, vec!["total_cents".into()], out)?;
    if total < 0 {
        out.push(
            Violation::new(vec!["total_cents".into()], Rule::TooSmall { min: 0 })
                .with_input(&Value::from(total)),
        );
        return None;
    }
    Some(total)
}

// =============================================================================
// Unknown keys
// =============================================================================

/// Extra fields are forbidden, not ignored. Unknown keys of an object are
/// reported after its declared-field violations; serde_json maps iterate
/// in sorted key order, so repeated validations report identically.
fn reject_unknown_keys(
    obj: &Map<String, Value>,
    allowed: &[&str],
    base: &[PathSeg],
    out: &mut Vec<Violation>,
) {
    for (key, value) in obj {
        if !allowed.contains(&key.as_str()) {
            let mut loc = base.to_vec();
            loc.push(key.as_str().into());
            out.push(Violation::new(loc, Rule::UnknownField).with_input(value));
        }
    }
}
