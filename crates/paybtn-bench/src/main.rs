//! Benchmark for button-parameter formatting and fingerprinting.
//!
//! Generates a synthetic order book, renders every order the way the
//! button generator does (amount + due date + reference), fingerprints
//! the rendered parameter strings, and parses everything back.

use std::time::Instant;

use paybtn::{
    Decimal, format_date, format_decimal, md5_hex, parse_date, parse_decimal,
};

const ORDERS: usize = 200_000;

/// Microseconds in one day, for spreading due dates across a decade.
const DAY_US: i64 = 24 * 60 * 60 * 1_000_000;

struct Order {
    reference: String,
    amount: Decimal,
    due: i64,
}

/// Deterministic synthetic workload: amounts up to ~50k units with
/// non-round cents, due dates spread across 2020-2030.
fn generate_orders() -> Vec<Order> {
    (0..ORDERS)
        .map(|i| {
            let cents = ((i as i64) * 7_919 + 41) % 5_000_000;
            let day = 18_262 + ((i as i64) * 37 % 3_653); // 2020-01-01 + offset
            Order {
                reference: format!("ORD-{:08}", i),
                amount: Decimal::from_hundredths(cents),
                due: day * DAY_US,
            }
        })
        .collect()
}

fn main() {
    tracing_subscriber::fmt::init();

    let generate_start = Instant::now();
    let orders = generate_orders();
    println!("Generated {} orders in {:?}", orders.len(), generate_start.elapsed());

    // Render amounts and due dates
    let format_start = Instant::now();
    let rendered: Vec<(String, String)> = orders
        .iter()
        .map(|o| (format_decimal(Some(o.amount)), format_date(Some(o.due))))
        .collect();
    let format_time = format_start.elapsed();
    println!(
        "Formatted {} amounts + dates in {:?} ({:.0} orders/ms)",
        rendered.len(),
        format_time,
        rendered.len() as f64 / format_time.as_secs_f64() / 1000.0
    );

    // Assemble parameter strings and fingerprint them
    let params: Vec<String> = orders
        .iter()
        .zip(&rendered)
        .map(|(o, (amount, due))| format!("ref={}&amount={}&due={}", o.reference, amount, due))
        .collect();
    let param_bytes: usize = params.iter().map(String::len).sum();

    let hash_start = Instant::now();
    let signatures: Vec<String> = params.iter().map(|p| md5_hex(p)).collect();
    let hash_time = hash_start.elapsed();
    println!(
        "Fingerprinted {} parameter strings ({} bytes) in {:?} ({:.1} MB/s)",
        signatures.len(),
        param_bytes,
        hash_time,
        param_bytes as f64 / hash_time.as_secs_f64() / 1_000_000.0
    );

    // Parse everything back and verify the roundtrip
    let parse_start = Instant::now();
    let mut mismatches = 0;
    for (order, (amount, due)) in orders.iter().zip(&rendered) {
        let parsed_amount = parse_decimal(amount).expect("rendered amount must parse");
        let parsed_due = parse_date(due).expect("rendered date must parse");
        if parsed_amount != Some(order.amount) || parsed_due != Some(order.due) {
            mismatches += 1;
        }
    }
    let parse_time = parse_start.elapsed();
    println!(
        "Parsed {} amounts + dates back in {:?} ({} mismatches)",
        orders.len(),
        parse_time,
        mismatches
    );

    assert_eq!(mismatches, 0, "formatting/parsing roundtrip must be exact");
}
